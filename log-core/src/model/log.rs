// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

use super::LogId;
use super::StudentId;
use super::VacancyId;

/// Review status of a work log.
///
/// Every log starts as `REPORTED`. A lecturer moves it to `ACCEPTED` or
/// `REJECTED` exactly once; both are terminal.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogStatus {
    #[default]
    Reported,
    Accepted,
    Rejected,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Reported => "REPORTED",
            LogStatus::Accepted => "ACCEPTED",
            LogStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log status: {0}")]
pub struct UnknownLogStatus(pub String);

impl FromStr for LogStatus {
    type Err = UnknownLogStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REPORTED" => Ok(LogStatus::Reported),
            "ACCEPTED" => Ok(LogStatus::Accepted),
            "REJECTED" => Ok(LogStatus::Rejected),
            _ => Err(UnknownLogStatus(s.to_string())),
        }
    }
}

/// Lecturer's decision on a reported log.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationAction {
    Accept,
    Reject,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid action value. Must be ACCEPT or REJECT.")]
pub struct UnknownVerificationAction(pub String);

impl FromStr for VerificationAction {
    type Err = UnknownVerificationAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACCEPT" => Ok(VerificationAction::Accept),
            "REJECT" => Ok(VerificationAction::Reject),
            _ => Err(UnknownVerificationAction(s.to_string())),
        }
    }
}

impl fmt::Display for VerificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationAction::Accept => f.write_str("ACCEPT"),
            VerificationAction::Reject => f.write_str("REJECT"),
        }
    }
}

/// Stored work log.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: LogId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub vacancy_id: VacancyId,
    pub student_id: StudentId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub log_date: NaiveDate,
    pub status: LogStatus,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl Log {
    pub fn from_new(id: LogId, new_log: NewLog) -> Self {
        Self {
            id,
            title: new_log.title,
            description: new_log.description,
            category: new_log.category,
            vacancy_id: new_log.vacancy_id,
            student_id: new_log.student_id,
            start_time: new_log.start_time,
            end_time: new_log.end_time,
            log_date: new_log.log_date,
            status: LogStatus::Reported,
            messages: Vec::new(),
        }
    }

    /// Replaces the editable content. Owner, vacancy and status stay as they are.
    pub fn apply_content(&mut self, content: NewLog) {
        self.title = content.title;
        self.description = content.description;
        self.category = content.category;
        self.start_time = content.start_time;
        self.end_time = content.end_time;
        self.log_date = content.log_date;
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn is_owned_by(&self, student_id: StudentId) -> bool {
        self.student_id == student_id
    }
}

/// Validated log content, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewLog {
    pub title: String,
    pub description: String,
    pub category: String,
    pub vacancy_id: VacancyId,
    pub student_id: StudentId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub log_date: NaiveDate,
}

/// Body of the create and update requests.
///
/// Owner, vacancy and status never come from the body; unknown fields such as
/// `studentId` or `status` are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_local_date_time")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_local_date_time")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub log_date: Option<NaiveDate>,
}

const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO local date-time with optional seconds, as sent by `datetime-local` inputs.
pub fn parse_local_date_time(raw: &str) -> Option<NaiveDateTime> {
    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}

fn deserialize_local_date_time<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_local_date_time(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid local date-time: {raw}"))),
        None => Ok(None),
    }
}
