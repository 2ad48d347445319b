// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use chrono::NaiveDate;

use crate::errors::LogValidationError;
use crate::model::LogRequest;
use crate::model::NewLog;
use crate::model::StudentId;
use crate::model::VacancyId;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_DURATION_HOURS: i64 = 12;

/// Checks log content before it is stored.
///
/// Rules are applied in a fixed order and the first violation is reported,
/// so clients always see the same message for the same input.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogValidator;

impl LogValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(
        &self,
        request: &LogRequest,
        student_id: Option<StudentId>,
        vacancy_id: Option<VacancyId>,
        today: NaiveDate,
    ) -> Result<NewLog, LogValidationError> {
        let student_id = student_id.ok_or(LogValidationError::MissingStudentId)?;

        let title = non_blank(&request.title).ok_or(LogValidationError::BlankTitle)?;
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(LogValidationError::TitleTooLong);
        }

        let description =
            non_blank(&request.description).ok_or(LogValidationError::BlankDescription)?;
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(LogValidationError::DescriptionTooLong);
        }

        let category = non_blank(&request.category).ok_or(LogValidationError::BlankCategory)?;
        let vacancy_id = vacancy_id.ok_or(LogValidationError::MissingVacancyId)?;

        let start_time = request.start_time.ok_or(LogValidationError::MissingStartTime)?;
        let end_time = request.end_time.ok_or(LogValidationError::MissingEndTime)?;
        let log_date = request.log_date.ok_or(LogValidationError::MissingLogDate)?;

        if start_time >= end_time {
            return Err(LogValidationError::StartNotBeforeEnd);
        }
        if log_date > today {
            return Err(LogValidationError::LogDateInFuture);
        }
        // whole hours, so 12h59m still passes
        if (end_time - start_time).num_hours() > MAX_DURATION_HOURS {
            return Err(LogValidationError::DurationTooLong);
        }

        Ok(NewLog {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            vacancy_id,
            student_id,
            start_time,
            end_time,
            log_date,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
