// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use log_core::model::Log;
use log_core::model::LogId;
use log_core::model::LogStatus;
use log_core::model::NewLog;
use log_core::model::StudentId;
use log_core::model::VacancyId;
use log_core::repository::LogRepository;
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::OptionalExtension;
use rusqlite::Row;

use super::sqlite_helper::create_connection;
use super::sqlite_helper::create_connection_in_memory;
use super::sqlite_helper::MEMORY_DB;

const LOG_COLUMNS: &str = "id, title, description, category, vacancy_id, student_id, \
                           start_time, end_time, log_date, status";

const NEWEST_FIRST: &str = "ORDER BY log_date DESC, id DESC";

/// Work logs stored in SQLite. Messages live in `log_messages`, keyed by log
/// id and position.
pub struct SqliteLogRepository {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteLogRepository {
    /// Opens (or creates) the database file. `:memory:` opens a private
    /// in-memory database.
    pub fn open(db_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db_path = db_path.as_ref();
        let conn = if db_path.as_os_str() == MEMORY_DB {
            create_connection_in_memory()?
        } else {
            create_connection(db_path)
                .with_context(|| format!("Failed to open database {db_path:?}"))?
        };
        tracing::info!(target: "sqlite", "Log storage opened: {db_path:?}");
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Ok(Self { conn: Mutex::new(create_connection_in_memory()?) })
    }

    fn select(&self, filter: &str, params: impl rusqlite::Params) -> anyhow::Result<Vec<Log>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!("SELECT {LOG_COLUMNS} FROM logs {filter}"))?;
        let mut logs = stmt.query_map(params, log_from_row)?.collect::<Result<Vec<_>, _>>()?;
        for log in logs.iter_mut() {
            log.messages = load_messages(&conn, log.id)?;
        }
        Ok(logs)
    }
}

impl LogRepository for SqliteLogRepository {
    fn insert(&self, new_log: NewLog) -> anyhow::Result<Log> {
        let conn = self.conn.lock();
        let status = LogStatus::Reported;
        conn.prepare_cached(
            "INSERT INTO logs (
                title, description, category, vacancy_id, student_id,
                start_time, end_time, log_date, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?
        .execute(rusqlite::params![
            new_log.title,
            new_log.description,
            new_log.category,
            new_log.vacancy_id,
            new_log.student_id,
            new_log.start_time,
            new_log.end_time,
            new_log.log_date,
            status.as_str(),
        ])?;
        let id = conn.last_insert_rowid();
        tracing::trace!(target: "sqlite", "inserted log {id}");
        Ok(Log::from_new(id, new_log))
    }

    fn find_by_id(&self, id: LogId) -> anyhow::Result<Option<Log>> {
        let conn = self.conn.lock();
        let log = conn
            .prepare_cached(&format!("SELECT {LOG_COLUMNS} FROM logs WHERE id = ?1"))?
            .query_row([id], log_from_row)
            .optional()?;
        match log {
            Some(mut log) => {
                log.messages = load_messages(&conn, id)?;
                Ok(Some(log))
            }
            None => Ok(None),
        }
    }

    fn update(&self, log: &Log) -> anyhow::Result<()> {
        let mut guarded = self.conn.lock();
        let tx = guarded.transaction()?;
        {
            let updated = tx
                .prepare_cached(
                    "UPDATE logs SET
                        title = ?2, description = ?3, category = ?4, vacancy_id = ?5,
                        student_id = ?6, start_time = ?7, end_time = ?8, log_date = ?9,
                        status = ?10
                    WHERE id = ?1",
                )?
                .execute(rusqlite::params![
                    log.id,
                    log.title,
                    log.description,
                    log.category,
                    log.vacancy_id,
                    log.student_id,
                    log.start_time,
                    log.end_time,
                    log.log_date,
                    log.status.as_str(),
                ])?;
            if updated == 0 {
                anyhow::bail!("log {} does not exist", log.id);
            }

            tx.prepare_cached("DELETE FROM log_messages WHERE log_id = ?1")?.execute([log.id])?;
            let mut stmt = tx.prepare_cached(
                "INSERT INTO log_messages (log_id, position, message) VALUES (?1, ?2, ?3)",
            )?;
            for (position, message) in log.messages.iter().enumerate() {
                stmt.execute(rusqlite::params![log.id, position as i64, message])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: LogId) -> anyhow::Result<bool> {
        let mut guarded = self.conn.lock();
        let tx = guarded.transaction()?;
        tx.prepare_cached("DELETE FROM log_messages WHERE log_id = ?1")?.execute([id])?;
        let deleted = tx.prepare_cached("DELETE FROM logs WHERE id = ?1")?.execute([id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    fn find_all(&self) -> anyhow::Result<Vec<Log>> {
        self.select("ORDER BY id", [])
    }

    fn count(&self) -> anyhow::Result<u64> {
        let count: i64 = self
            .conn
            .lock()
            .prepare_cached("SELECT count(*) FROM logs")?
            .query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn find_by_student_and_vacancy(
        &self,
        student_id: StudentId,
        vacancy_id: VacancyId,
    ) -> anyhow::Result<Vec<Log>> {
        self.select(
            &format!("WHERE student_id = ?1 AND vacancy_id = ?2 {NEWEST_FIRST}"),
            rusqlite::params![student_id, vacancy_id],
        )
    }

    fn find_by_vacancy_and_status(
        &self,
        vacancy_id: VacancyId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        self.select(
            &format!("WHERE vacancy_id = ?1 AND status = ?2 {NEWEST_FIRST}"),
            rusqlite::params![vacancy_id, status.as_str()],
        )
    }

    fn find_by_student_and_status(
        &self,
        student_id: StudentId,
        status: LogStatus,
    ) -> anyhow::Result<Vec<Log>> {
        self.select(
            &format!("WHERE student_id = ?1 AND status = ?2 {NEWEST_FIRST}"),
            rusqlite::params![student_id, status.as_str()],
        )
    }
}

fn log_from_row(row: &Row<'_>) -> rusqlite::Result<Log> {
    let status: String = row.get(9)?;
    let status = status
        .parse::<LogStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;
    Ok(Log {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        vacancy_id: row.get(4)?,
        student_id: row.get(5)?,
        start_time: row.get::<_, NaiveDateTime>(6)?,
        end_time: row.get::<_, NaiveDateTime>(7)?,
        log_date: row.get::<_, NaiveDate>(8)?,
        status,
        messages: Vec::new(),
    })
}

fn load_messages(conn: &rusqlite::Connection, log_id: LogId) -> anyhow::Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT message FROM log_messages WHERE log_id = ?1 ORDER BY position",
    )?;
    let messages = stmt.query_map([log_id], |row| row.get(0))?.collect::<Result<Vec<_>, _>>()?;
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use testdir::testdir;

    use super::*;

    fn new_log(student_id: StudentId, vacancy_id: VacancyId, day: u32) -> NewLog {
        let date = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        NewLog {
            title: format!("Log {day}"),
            description: "Praktikum".to_string(),
            category: "Asistensi".to_string(),
            vacancy_id,
            student_id,
            start_time: date.and_hms_opt(9, 0, 0).unwrap(),
            end_time: date.and_hms_opt(11, 30, 0).unwrap(),
            log_date: date,
        }
    }

    #[test]
    fn test_insert_and_find() -> anyhow::Result<()> {
        let repository = SqliteLogRepository::open_in_memory()?;
        let first = repository.insert(new_log(1, 10, 1))?;
        let second = repository.insert(new_log(1, 10, 2))?;
        assert!(second.id > first.id);
        assert_eq!(first.status, LogStatus::Reported);

        let found = repository.find_by_id(first.id)?.unwrap();
        assert_eq!(found, first);
        assert_eq!(found.duration_minutes(), 150);
        assert_eq!(repository.find_by_id(999)?, None);
        Ok(())
    }

    #[test]
    fn test_update_replaces_status_and_messages() -> anyhow::Result<()> {
        let repository = SqliteLogRepository::open_in_memory()?;
        let mut log = repository.insert(new_log(1, 10, 1))?;
        log.title = "Changed".to_string();
        log.status = LogStatus::Accepted;
        log.messages = vec!["first".to_string(), "second".to_string()];
        repository.update(&log)?;
        assert_eq!(repository.find_by_id(log.id)?, Some(log.clone()));

        log.messages.truncate(1);
        repository.update(&log)?;
        assert_eq!(repository.find_by_id(log.id)?.unwrap().messages, vec!["first".to_string()]);

        log.id = 999;
        assert!(repository.update(&log).is_err());
        Ok(())
    }

    #[test]
    fn test_delete_removes_messages() -> anyhow::Result<()> {
        let repository = SqliteLogRepository::open_in_memory()?;
        let mut log = repository.insert(new_log(1, 10, 1))?;
        log.messages.push("hello".to_string());
        repository.update(&log)?;

        assert_eq!(repository.count()?, 1);
        assert!(repository.delete(log.id)?);
        assert!(!repository.delete(log.id)?);
        assert_eq!(repository.find_by_id(log.id)?, None);
        assert_eq!(repository.count()?, 0);
        let orphans: i64 =
            repository.conn.lock().query_row("SELECT count(*) FROM log_messages", [], |row| {
                row.get(0)
            })?;
        assert_eq!(orphans, 0);
        Ok(())
    }

    #[test]
    fn test_queries_are_filtered_and_newest_first() -> anyhow::Result<()> {
        let repository = SqliteLogRepository::open_in_memory()?;
        repository.insert(new_log(1, 10, 1))?;
        repository.insert(new_log(1, 10, 3))?;
        repository.insert(new_log(1, 20, 2))?;
        repository.insert(new_log(2, 10, 3))?;
        let mut accepted = repository.insert(new_log(1, 10, 3))?;
        accepted.status = LogStatus::Accepted;
        repository.update(&accepted)?;

        let ids: Vec<LogId> =
            repository.find_by_student_and_vacancy(1, 10)?.iter().map(|log| log.id).collect();
        assert_eq!(ids, vec![5, 2, 1]);

        let ids: Vec<LogId> = repository
            .find_by_vacancy_and_status(10, LogStatus::Reported)?
            .iter()
            .map(|log| log.id)
            .collect();
        assert_eq!(ids, vec![4, 2, 1]);

        let accepted_logs = repository.find_by_student_and_status(1, LogStatus::Accepted)?;
        assert_eq!(accepted_logs, vec![accepted]);

        let ids: Vec<LogId> = repository.find_all()?.iter().map(|log| log.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_file_database_survives_reopen() -> anyhow::Result<()> {
        let db_path = testdir!().join("logs.db");
        let log = {
            let repository = SqliteLogRepository::open(&db_path)?;
            let mut log = repository.insert(new_log(3, 30, 4))?;
            log.messages.push("persisted".to_string());
            repository.update(&log)?;
            log
        };
        let repository = SqliteLogRepository::open(&db_path)?;
        assert_eq!(repository.find_by_id(log.id)?, Some(log));
        Ok(())
    }
}
