// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use chrono::Month;
use serde::Serialize;
use serde::Serializer;

use super::VacancyId;

/// Honor earned on one vacancy in a month.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHonor {
    pub vacancy_id: VacancyId,
    pub vacancy_title: String,
    pub year: i32,
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
    /// Rupiah.
    pub total_honor: u64,
    pub total_hours: u64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHonorSummary {
    pub year: i32,
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
    pub total_honor: u64,
    pub total_hours: u64,
    pub details: Vec<DashboardHonor>,
}

impl DashboardHonorSummary {
    pub fn from_details(year: i32, month: Month, details: Vec<DashboardHonor>) -> Self {
        let total_honor = details.iter().map(|honor| honor.total_honor).sum();
        let total_hours = details.iter().map(|honor| honor.total_hours).sum();
        Self { year, month, total_honor, total_hours, details }
    }
}

fn serialize_month<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&month.name().to_uppercase())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn honor(vacancy_id: VacancyId, total_honor: u64, total_hours: u64) -> DashboardHonor {
        DashboardHonor {
            vacancy_id,
            vacancy_title: format!("Vacancy {vacancy_id}"),
            year: 2025,
            month: Month::May,
            total_honor,
            total_hours,
        }
    }

    #[test]
    fn test_summary_sums_details() {
        let summary = DashboardHonorSummary::from_details(
            2025,
            Month::May,
            vec![honor(456, 110_000, 4), honor(789, 55_000, 2)],
        );
        assert_eq!(summary.total_honor, 165_000);
        assert_eq!(summary.total_hours, 6);
        assert_eq!(summary.details.len(), 2);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = DashboardHonorSummary::from_details(2024, Month::February, vec![]);
        assert_eq!(summary.total_honor, 0);
        assert_eq!(summary.total_hours, 0);
        assert!(summary.details.is_empty());
    }

    #[test]
    fn test_month_is_serialized_as_upper_case_name() {
        let value = serde_json::to_value(honor(456, 110_000, 4)).unwrap();
        assert_eq!(value["month"], json!("MAY"));
        assert_eq!(value["vacancyTitle"], json!("Vacancy 456"));
        assert_eq!(value["totalHonor"], json!(110_000));
        assert_eq!(value["totalHours"], json!(4));
    }
}
