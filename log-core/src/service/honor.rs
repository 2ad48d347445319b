// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use chrono::Month;

use crate::errors::LogError;
use crate::model::DashboardHonor;
use crate::model::DashboardHonorSummary;
use crate::model::LogStatus;
use crate::model::StudentId;
use crate::model::VacancyId;
use crate::repository::LogRepository;

/// Rupiah paid per accepted hour.
pub const HOURLY_RATE: u64 = 27_500;

const MINUTES_PER_HOUR: u64 = 60;

pub struct DashboardHonorService {
    repository: Arc<dyn LogRepository>,
}

impl DashboardHonorService {
    pub fn new(repository: Arc<dyn LogRepository>) -> Self {
        Self { repository }
    }

    /// Honor per vacancy for the student's accepted logs dated in the given
    /// month, ordered by vacancy id.
    pub fn dashboard_honor(
        &self,
        student_id: StudentId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DashboardHonor>, LogError> {
        let period = to_month(month)?;
        let accepted =
            self.repository.find_by_student_and_status(student_id, LogStatus::Accepted)?;

        let mut minutes_by_vacancy: BTreeMap<VacancyId, u64> = BTreeMap::new();
        for log in accepted
            .iter()
            .filter(|log| log.log_date.year() == year && log.log_date.month() == month)
        {
            let minutes = u64::try_from(log.duration_minutes()).unwrap_or(0);
            *minutes_by_vacancy.entry(log.vacancy_id).or_default() += minutes;
        }

        let details: Vec<DashboardHonor> = minutes_by_vacancy
            .into_iter()
            .map(|(vacancy_id, minutes)| DashboardHonor {
                vacancy_id,
                vacancy_title: format!("Vacancy {vacancy_id}"),
                year,
                month: period,
                total_honor: honor_for_minutes(minutes),
                total_hours: minutes / MINUTES_PER_HOUR,
            })
            .collect();
        tracing::debug!(
            "Computed honor for student {} in {}-{:02}: {} vacancies",
            student_id,
            year,
            month,
            details.len()
        );
        Ok(details)
    }

    pub fn dashboard_honor_summary(
        &self,
        student_id: StudentId,
        year: i32,
        month: u32,
    ) -> Result<DashboardHonorSummary, LogError> {
        let details = self.dashboard_honor(student_id, year, month)?;
        Ok(DashboardHonorSummary::from_details(year, to_month(month)?, details))
    }
}

/// Rounded half up to the nearest rupiah.
fn honor_for_minutes(minutes: u64) -> u64 {
    (HOURLY_RATE * minutes + MINUTES_PER_HOUR / 2) / MINUTES_PER_HOUR
}

fn to_month(month: u32) -> Result<Month, LogError> {
    u8::try_from(month)
        .ok()
        .and_then(|value| Month::try_from(value).ok())
        .ok_or(LogError::InvalidPeriod(month))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::NewLog;
    use crate::repository::InMemoryLogRepository;

    const STUDENT: StudentId = 123;

    struct Fixture {
        repository: Arc<InMemoryLogRepository>,
        service: DashboardHonorService,
    }

    impl Fixture {
        fn new() -> Self {
            let repository = Arc::new(InMemoryLogRepository::new());
            let service = DashboardHonorService::new(repository.clone());
            Self { repository, service }
        }

        fn add(
            &self,
            student_id: StudentId,
            vacancy_id: VacancyId,
            date: NaiveDate,
            (start, end): (u32, u32),
            status: LogStatus,
        ) {
            let mut log = self
                .repository
                .insert(NewLog {
                    title: "Log".to_string(),
                    description: "Work".to_string(),
                    category: "Asistensi".to_string(),
                    vacancy_id,
                    student_id,
                    start_time: date.and_hms_opt(start, 0, 0).unwrap(),
                    end_time: date.and_hms_opt(end, 0, 0).unwrap(),
                    log_date: date,
                })
                .unwrap();
            log.status = status;
            self.repository.update(&log).unwrap();
        }
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    #[test]
    fn test_groups_accepted_logs_by_vacancy() {
        let fixture = Fixture::new();
        fixture.add(STUDENT, 789, may(2), (8, 10), LogStatus::Accepted);
        fixture.add(STUDENT, 456, may(1), (9, 11), LogStatus::Accepted);
        fixture.add(STUDENT, 456, may(3), (13, 15), LogStatus::Accepted);
        fixture.add(STUDENT, 456, may(4), (9, 17), LogStatus::Rejected);
        fixture.add(STUDENT, 456, may(5), (9, 17), LogStatus::Reported);
        let april = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        fixture.add(STUDENT, 456, april, (9, 17), LogStatus::Accepted);
        fixture.add(STUDENT + 1, 456, may(1), (9, 17), LogStatus::Accepted);

        let details = fixture.service.dashboard_honor(STUDENT, 2025, 5).unwrap();
        assert_eq!(details.len(), 2);

        assert_eq!(details[0].vacancy_id, 456);
        assert_eq!(details[0].vacancy_title, "Vacancy 456");
        assert_eq!(details[0].month, Month::May);
        assert_eq!(details[0].total_hours, 4);
        assert_eq!(details[0].total_honor, 110_000);

        assert_eq!(details[1].vacancy_id, 789);
        assert_eq!(details[1].total_hours, 2);
        assert_eq!(details[1].total_honor, 55_000);
    }

    #[test]
    fn test_summary_totals() {
        let fixture = Fixture::new();
        fixture.add(STUDENT, 456, may(1), (9, 13), LogStatus::Accepted);
        fixture.add(STUDENT, 789, may(2), (8, 10), LogStatus::Accepted);

        let summary = fixture.service.dashboard_honor_summary(STUDENT, 2025, 5).unwrap();
        assert_eq!(summary.year, 2025);
        assert_eq!(summary.month, Month::May);
        assert_eq!(summary.total_hours, 6);
        assert_eq!(summary.total_honor, 165_000);
        assert_eq!(summary.details.len(), 2);
    }

    #[test]
    fn test_empty_month() {
        let fixture = Fixture::new();
        fixture.add(STUDENT, 456, may(1), (9, 13), LogStatus::Accepted);
        let summary = fixture.service.dashboard_honor_summary(STUDENT, 2025, 6).unwrap();
        assert_eq!(summary.total_honor, 0);
        assert!(summary.details.is_empty());
    }

    #[test]
    fn test_invalid_month() {
        let fixture = Fixture::new();
        assert!(matches!(
            fixture.service.dashboard_honor(STUDENT, 2025, 13),
            Err(LogError::InvalidPeriod(13))
        ));
        assert!(matches!(
            fixture.service.dashboard_honor_summary(STUDENT, 2025, 0),
            Err(LogError::InvalidPeriod(0))
        ));
    }

    #[test]
    fn test_honor_rounding() {
        assert_eq!(honor_for_minutes(0), 0);
        assert_eq!(honor_for_minutes(60), 27_500);
        assert_eq!(honor_for_minutes(90), 41_250);
        // 27500 / 60 = 458.33
        assert_eq!(honor_for_minutes(1), 458);
        // 27500 * 7 / 60 = 3208.33
        assert_eq!(honor_for_minutes(7), 3_208);
        // 27500 * 5 / 60 = 2291.67
        assert_eq!(honor_for_minutes(5), 2_292);
    }
}
