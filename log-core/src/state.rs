// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use crate::errors::LogError;
use crate::model::LogStatus;
use crate::model::VerificationAction;

impl LogStatus {
    /// Only reported logs can be edited, deleted or verified.
    pub fn is_editable(&self) -> bool {
        matches!(self, LogStatus::Reported)
    }

    pub fn verify(self, action: VerificationAction) -> Result<LogStatus, LogError> {
        match (self, action) {
            (LogStatus::Reported, VerificationAction::Accept) => Ok(LogStatus::Accepted),
            (LogStatus::Reported, VerificationAction::Reject) => Ok(LogStatus::Rejected),
            (LogStatus::Accepted, _) => Err(LogError::invalid_state(
                "Log is already accepted; no further verification allowed.",
            )),
            (LogStatus::Rejected, _) => Err(LogError::invalid_state(
                "Log is already rejected; no further verification allowed.",
            )),
        }
    }
}
