// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::sync::Arc;

use parking_lot::Mutex;

use super::local_today;
use super::Clock;
use crate::errors::LogError;
use crate::model::Log;
use crate::model::LogId;
use crate::model::LogRequest;
use crate::model::LogStatus;
use crate::model::MessageRequest;
use crate::model::StudentId;
use crate::model::VacancyId;
use crate::model::VerificationAction;
use crate::principal::Principal;
use crate::principal::Role;
use crate::repository::LogRepository;
use crate::validator::LogValidator;

/// Work log use cases for students and lecturers.
///
/// Every mutation runs under `write_lock` so that the status check and the
/// write that depends on it cannot interleave with another request.
pub struct LogService {
    repository: Arc<dyn LogRepository>,
    validator: LogValidator,
    clock: Clock,
    write_lock: Mutex<()>,
}

impl LogService {
    pub fn new(repository: Arc<dyn LogRepository>) -> Self {
        Self::with_clock(repository, local_today)
    }

    pub fn with_clock(repository: Arc<dyn LogRepository>, clock: Clock) -> Self {
        Self { repository, validator: LogValidator::new(), clock, write_lock: Mutex::new(()) }
    }

    pub fn create_log(
        &self,
        principal: &Principal,
        vacancy_id: VacancyId,
        request: &LogRequest,
    ) -> Result<Log, LogError> {
        let new_log = self.validator.validate(
            request,
            Some(principal.user_id),
            Some(vacancy_id),
            (self.clock)(),
        )?;
        let _guard = self.write_lock.lock();
        let log = self.repository.insert(new_log)?;
        tracing::info!("Log created with ID: {} for vacancy {}", log.id, vacancy_id);
        Ok(log)
    }

    pub fn get_log(&self, principal: &Principal, id: LogId) -> Result<Log, LogError> {
        let log = self.find(id)?;
        if !log.is_owned_by(principal.user_id) {
            tracing::warn!("User {} attempted to access unauthorized log ID {}", principal.user_id, id);
            return Err(LogError::forbidden("Access denied to this log."));
        }
        Ok(log)
    }

    /// Updates the content of a reported log. Owner, vacancy and status are
    /// taken from the stored log, never from the request.
    pub fn update_log(
        &self,
        principal: &Principal,
        id: LogId,
        request: &LogRequest,
    ) -> Result<Log, LogError> {
        tracing::info!("Attempting to update log with ID: {}", id);
        let _guard = self.write_lock.lock();
        let mut log = self.find(id)?;
        if !log.is_owned_by(principal.user_id) {
            tracing::warn!(
                "User {} attempted to update log {} owned by {}",
                principal.user_id,
                id,
                log.student_id
            );
            return Err(LogError::forbidden("You are not authorized to update this log."));
        }
        if !log.status.is_editable() {
            tracing::warn!("Log with ID: {} cannot be updated due to status: {}", id, log.status);
            return Err(LogError::invalid_state(format!(
                "Log tidak dapat diubah karena statusnya {}",
                log.status
            )));
        }

        let content = self.validator.validate(
            request,
            Some(log.student_id),
            Some(log.vacancy_id),
            (self.clock)(),
        )?;
        log.apply_content(content);
        self.repository.update(&log)?;
        tracing::info!("Log updated with ID: {}", id);
        Ok(log)
    }

    pub fn delete_log(&self, principal: &Principal, id: LogId) -> Result<(), LogError> {
        tracing::info!("Attempting to delete log with ID: {}", id);
        let _guard = self.write_lock.lock();
        let log = self.find(id)?;
        if !log.is_owned_by(principal.user_id) {
            tracing::warn!(
                "User {} attempted to delete log {} owned by {}",
                principal.user_id,
                id,
                log.student_id
            );
            return Err(LogError::forbidden("You are not authorized to delete this log."));
        }
        if !log.status.is_editable() {
            tracing::warn!("Log with ID: {} cannot be deleted due to status: {}", id, log.status);
            return Err(LogError::invalid_state(format!(
                "Log tidak dapat dihapus karena statusnya {}",
                log.status
            )));
        }
        self.repository.delete(id)?;
        tracing::info!("Log deleted with ID: {}", id);
        Ok(())
    }

    pub fn verify_log(&self, id: LogId, action: VerificationAction) -> Result<Log, LogError> {
        tracing::info!("Attempting to verify log with ID: {} with action: {}", id, action);
        let _guard = self.write_lock.lock();
        let mut log = self.find(id)?;
        if !log.status.is_editable() {
            tracing::warn!("Log with ID: {} has already been verified with status: {}", id, log.status);
            return Err(LogError::invalid_state(format!(
                "Log sudah diverifikasi dengan status {}",
                log.status
            )));
        }
        log.status = log.status.verify(action)?;
        self.repository.update(&log)?;
        tracing::info!("Log with ID: {} verified. New status: {}", id, log.status);
        Ok(log)
    }

    pub fn list_student_logs(
        &self,
        student_id: StudentId,
        vacancy_id: VacancyId,
    ) -> Result<Vec<Log>, LogError> {
        let logs = self.repository.find_by_student_and_vacancy(student_id, vacancy_id)?;
        tracing::info!(
            "Found {} logs for student ID: {} and vacancy ID: {}",
            logs.len(),
            student_id,
            vacancy_id
        );
        Ok(logs)
    }

    /// Logs of a vacancy still waiting for a decision.
    pub fn list_lecturer_logs(&self, vacancy_id: VacancyId) -> Result<Vec<Log>, LogError> {
        let logs = self.repository.find_by_vacancy_and_status(vacancy_id, LogStatus::Reported)?;
        tracing::info!("Found {} reported logs for vacancy ID: {}", logs.len(), vacancy_id);
        Ok(logs)
    }

    pub fn list_all_logs(&self) -> Result<Vec<Log>, LogError> {
        Ok(self.repository.find_all()?)
    }

    pub fn count_logs(&self) -> Result<u64, LogError> {
        Ok(self.repository.count()?)
    }

    pub fn add_message(
        &self,
        principal: &Principal,
        id: LogId,
        request: MessageRequest,
    ) -> Result<Log, LogError> {
        let message = request.into_message()?;
        let _guard = self.write_lock.lock();
        let mut log = self.find(id)?;
        if !log.is_owned_by(principal.user_id) {
            tracing::warn!(
                "User {} attempted to add message to log {} owned by {}",
                principal.user_id,
                id,
                log.student_id
            );
            return Err(LogError::forbidden("User not authorized to add message to this log."));
        }
        log.messages.push(message);
        self.repository.update(&log)?;
        tracing::info!("Message added to log with ID: {}. Total messages: {}", id, log.messages.len());
        Ok(log)
    }

    /// Owners may read their own thread; lecturers may read any.
    pub fn get_messages(&self, principal: &Principal, id: LogId) -> Result<Vec<String>, LogError> {
        let log = self.find(id)?;
        let authorized = principal.has_role(&Role::Dosen)
            || (principal.has_role(&Role::Mahasiswa) && log.is_owned_by(principal.user_id));
        if !authorized {
            tracing::warn!(
                "User {} attempted to fetch messages for log {} owned by {}",
                principal.user_id,
                id,
                log.student_id
            );
            return Err(LogError::forbidden("User not authorized to view messages for this log."));
        }
        Ok(log.messages)
    }

    fn find(&self, id: LogId) -> Result<Log, LogError> {
        self.repository.find_by_id(id)?.ok_or_else(|| {
            tracing::warn!("Log not found with ID: {}", id);
            LogError::NotFound(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::NaiveDate;

    use super::*;
    use crate::errors::LogValidationError;
    use crate::repository::InMemoryLogRepository;

    const STUDENT: i64 = 123;
    const OTHER_STUDENT: i64 = 456;
    const VACANCY: i64 = 10;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn service() -> LogService {
        LogService::with_clock(Arc::new(InMemoryLogRepository::new()), today)
    }

    fn request(title: &str) -> LogRequest {
        let date = today() - Duration::days(1);
        LogRequest {
            title: Some(title.to_string()),
            description: Some("Grading assignments".to_string()),
            category: Some("Koreksi".to_string()),
            start_time: date.and_hms_opt(9, 0, 0),
            end_time: date.and_hms_opt(11, 0, 0),
            log_date: Some(date),
        }
    }

    fn student() -> Principal {
        Principal::student(STUDENT)
    }

    #[test]
    fn test_create_sets_owner_vacancy_and_status() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Koreksi tugas")).unwrap();
        assert_eq!(log.student_id, STUDENT);
        assert_eq!(log.vacancy_id, VACANCY);
        assert_eq!(log.status, LogStatus::Reported);
        assert_eq!(service.get_log(&student(), log.id).unwrap(), log);
    }

    #[test]
    fn test_create_rejects_invalid_content() {
        let service = service();
        let err = service.create_log(&student(), VACANCY, &request("  ")).unwrap_err();
        assert!(matches!(err, LogError::Validation(LogValidationError::BlankTitle)));
        assert!(service.list_all_logs().unwrap().is_empty());
    }

    #[test]
    fn test_get_log_checks_owner() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Mine")).unwrap();
        let err = service.get_log(&Principal::student(OTHER_STUDENT), log.id).unwrap_err();
        assert!(matches!(err, LogError::Forbidden(_)));
        assert!(matches!(service.get_log(&student(), 99), Err(LogError::NotFound(99))));
    }

    #[test]
    fn test_update_preserves_owner_and_status() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Before")).unwrap();
        let updated = service.update_log(&student(), log.id, &request("After")).unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.student_id, STUDENT);
        assert_eq!(updated.vacancy_id, VACANCY);
        assert_eq!(updated.status, LogStatus::Reported);
        assert_eq!(service.get_log(&student(), log.id).unwrap().title, "After");
    }

    #[test]
    fn test_update_rules() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Before")).unwrap();

        let err =
            service.update_log(&Principal::student(OTHER_STUDENT), log.id, &request("x")).unwrap_err();
        assert_eq!(err.to_string(), "You are not authorized to update this log.");

        let err = service.update_log(&student(), log.id, &request("")).unwrap_err();
        assert_eq!(err.to_string(), "Judul log tidak boleh kosong.");

        service.verify_log(log.id, VerificationAction::Accept).unwrap();
        let err = service.update_log(&student(), log.id, &request("After")).unwrap_err();
        assert_eq!(err.to_string(), "Log tidak dapat diubah karena statusnya ACCEPTED");

        assert!(matches!(
            service.update_log(&student(), 42, &request("After")),
            Err(LogError::NotFound(42))
        ));
    }

    #[test]
    fn test_delete_rules() {
        let service = service();
        let kept = service.create_log(&student(), VACANCY, &request("Kept")).unwrap();
        let removed = service.create_log(&student(), VACANCY, &request("Removed")).unwrap();

        let err = service.delete_log(&Principal::student(OTHER_STUDENT), removed.id).unwrap_err();
        assert!(matches!(err, LogError::Forbidden(_)));

        service.delete_log(&student(), removed.id).unwrap();
        assert!(matches!(service.get_log(&student(), removed.id), Err(LogError::NotFound(_))));

        service.verify_log(kept.id, VerificationAction::Reject).unwrap();
        let err = service.delete_log(&student(), kept.id).unwrap_err();
        assert_eq!(err.to_string(), "Log tidak dapat dihapus karena statusnya REJECTED");
    }

    #[test]
    fn test_verify_only_once() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Verify me")).unwrap();
        let verified = service.verify_log(log.id, VerificationAction::Accept).unwrap();
        assert_eq!(verified.status, LogStatus::Accepted);

        let err = service.verify_log(log.id, VerificationAction::Reject).unwrap_err();
        assert_eq!(err.to_string(), "Log sudah diverifikasi dengan status ACCEPTED");
        assert!(matches!(
            service.verify_log(77, VerificationAction::Accept),
            Err(LogError::NotFound(77))
        ));
    }

    #[test]
    fn test_listings() {
        let service = service();
        let first = service.create_log(&student(), VACANCY, &request("First")).unwrap();
        let second = service.create_log(&student(), VACANCY, &request("Second")).unwrap();
        service.create_log(&student(), VACANCY + 1, &request("Elsewhere")).unwrap();
        service
            .create_log(&Principal::student(OTHER_STUDENT), VACANCY, &request("Other"))
            .unwrap();
        service.verify_log(first.id, VerificationAction::Accept).unwrap();

        let logs = service.list_student_logs(STUDENT, VACANCY).unwrap();
        let ids: Vec<LogId> = logs.iter().map(|log| log.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let pending = service.list_lecturer_logs(VACANCY).unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|log| log.status == LogStatus::Reported));

        assert_eq!(service.list_all_logs().unwrap().len(), 4);
        assert_eq!(service.count_logs().unwrap(), 4);
    }

    #[test]
    fn test_messages() {
        let service = service();
        let log = service.create_log(&student(), VACANCY, &request("Chat")).unwrap();

        let updated =
            service.add_message(&student(), log.id, MessageRequest::new("Sudah dikerjakan")).unwrap();
        assert_eq!(updated.messages, vec!["Sudah dikerjakan".to_string()]);

        let err = service.add_message(&student(), log.id, MessageRequest::new(" ")).unwrap_err();
        assert_eq!(err.to_string(), "Message cannot be blank");

        let err = service
            .add_message(&Principal::student(OTHER_STUDENT), log.id, MessageRequest::new("hi"))
            .unwrap_err();
        assert_eq!(err.to_string(), "User not authorized to add message to this log.");

        assert_eq!(service.get_messages(&student(), log.id).unwrap().len(), 1);
        assert_eq!(service.get_messages(&Principal::lecturer(1), log.id).unwrap().len(), 1);

        let err = service.get_messages(&Principal::student(OTHER_STUDENT), log.id).unwrap_err();
        assert_eq!(err.to_string(), "User not authorized to view messages for this log.");

        let err = service.get_messages(&Principal::new(STUDENT, vec![]), log.id).unwrap_err();
        assert!(matches!(err, LogError::Forbidden(_)));
    }
}
