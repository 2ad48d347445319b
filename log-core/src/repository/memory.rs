// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::collections::BTreeMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use parking_lot::RwLock;

use super::sort_newest_first;
use super::LogRepository;
use crate::model::Log;
use crate::model::LogId;
use crate::model::LogStatus;
use crate::model::NewLog;
use crate::model::StudentId;
use crate::model::VacancyId;

/// Process-local repository, used for tests and `--db :memory:` runs.
pub struct InMemoryLogRepository {
    storage: RwLock<BTreeMap<LogId, Log>>,
    id_generator: AtomicI64,
}

impl Default for InMemoryLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogRepository {
    pub fn new() -> Self {
        Self { storage: RwLock::new(BTreeMap::new()), id_generator: AtomicI64::new(1) }
    }

    fn select(&self, predicate: impl Fn(&Log) -> bool) -> Vec<Log> {
        let mut logs: Vec<Log> =
            self.storage.read().values().filter(|log| predicate(log)).cloned().collect();
        sort_newest_first(&mut logs);
        logs
    }
}

impl LogRepository for InMemoryLogRepository {
    fn insert(&self, new_log: NewLog) -> anyhow::Result<Log> {
        let id = self.id_generator.fetch_add(1, Ordering::Relaxed);
        let log = Log::from_new(id, new_log);
        self.storage.write().insert(id, log.clone());
        Ok(log)
    }

    fn find_by_id(&self, id: LogId) -> anyhow::Result<Option<Log>> {
        Ok(self.storage.read().get(&id).cloned())
    }

    fn update(&self, log: &Log) -> anyhow::Result<()> {
        let mut storage = self.storage.write();
        let Some(stored) = storage.get_mut(&log.id) else {
            anyhow::bail!("log {} does not exist", log.id);
        };
        *stored = log.clone();
        Ok(())
    }

    fn delete(&self, id: LogId) -> anyhow::Result<bool> {
        Ok(self.storage.write().remove(&id).is_some())
    }

    fn find_all(&self) -> anyhow::Result<Vec<Log>> {
        Ok(self.storage.read().values().cloned().collect())
    }

    fn count(&self) -> anyhow::Result<u64> {
        Ok(self.storage.read().len() as u64)
    }

    fn find_by_student_and_vacancy(
        &self,
        student_id: StudentId,
        vacancy_id: VacancyId,
    ) -> anyhow::Result<Vec<Log>> {
        Ok(self.select(|log| log.student_id == student_id && log.vacancy_id == vacancy_id))
    }

    fn find_by_vacancy_and_status(
        &self,
        vacancy_id: VacancyId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        Ok(self.select(|log| log.vacancy_id == vacancy_id && log.status == status))
    }

    fn find_by_student_and_status(
        &self,
        student_id: StudentId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        Ok(self.select(|log| log.student_id == student_id && log.status == status))
    }
}
