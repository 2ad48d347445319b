// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use serde::Deserialize;
use serde::Serialize;

use crate::errors::LogValidationError;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    /// Returns the message text, rejecting missing and whitespace-only input.
    pub fn into_message(self) -> Result<String, LogValidationError> {
        match self.message {
            Some(message) if !message.trim().is_empty() => Ok(message),
            _ => Err(LogValidationError::BlankMessage),
        }
    }
}
