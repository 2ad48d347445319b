// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

mod memory;

pub use memory::InMemoryLogRepository;

use crate::model::Log;
use crate::model::LogId;
use crate::model::LogStatus;
use crate::model::NewLog;
use crate::model::StudentId;
use crate::model::VacancyId;

/// Storage of work logs.
///
/// Listing queries return logs newest first: by log date descending, then by
/// id descending.
pub trait LogRepository: Send + Sync {
    /// Stores a new log under a fresh id. The log starts as `REPORTED`.
    fn insert(&self, new_log: NewLog) -> anyhow::Result<Log>;

    fn find_by_id(&self, id: LogId) -> anyhow::Result<Option<Log>>;

    /// Overwrites an existing log, including its status and messages.
    fn update(&self, log: &Log) -> anyhow::Result<()>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: LogId) -> anyhow::Result<bool>;

    /// All logs ordered by id.
    fn find_all(&self) -> anyhow::Result<Vec<Log>>;

    fn count(&self) -> anyhow::Result<u64>;

    fn find_by_student_and_vacancy(
        &self,
        student_id: StudentId,
        vacancy_id: VacancyId,
    ) -> anyhow::Result<Vec<Log>>;

    fn find_by_vacancy_and_status(
        &self,
        vacancy_id: VacancyId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>>;

    fn find_by_student_and_status(
        &self,
        student_id: StudentId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>>;
}

pub fn sort_newest_first(logs: &mut [Log]) {
    logs.sort_by(|a, b| b.log_date.cmp(&a.log_date).then(b.id.cmp(&a.id)));
}
