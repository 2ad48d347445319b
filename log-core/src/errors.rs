// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use thiserror::Error;

use crate::model::LogId;
use crate::validator::MAX_DESCRIPTION_LEN;
use crate::validator::MAX_DURATION_HOURS;
use crate::validator::MAX_TITLE_LEN;

/// Rejected log content. The messages are returned to API clients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogValidationError {
    #[error("Student ID tidak boleh kosong.")]
    MissingStudentId,

    #[error("Judul log tidak boleh kosong.")]
    BlankTitle,

    #[error("Judul log tidak boleh lebih dari {} karakter.", MAX_TITLE_LEN)]
    TitleTooLong,

    #[error("Deskripsi log tidak boleh kosong.")]
    BlankDescription,

    #[error("Deskripsi log tidak boleh lebih dari {} karakter.", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,

    #[error("Kategori tidak boleh kosong.")]
    BlankCategory,

    #[error("ID lowongan tidak boleh kosong.")]
    MissingVacancyId,

    #[error("Waktu mulai harus diisi.")]
    MissingStartTime,

    #[error("Waktu selesai harus diisi.")]
    MissingEndTime,

    #[error("Tanggal log harus diisi.")]
    MissingLogDate,

    #[error("Waktu mulai harus sebelum waktu selesai.")]
    StartNotBeforeEnd,

    #[error("Tanggal log tidak boleh di masa depan.")]
    LogDateInFuture,

    #[error("Durasi log tidak boleh lebih dari {} jam.", MAX_DURATION_HOURS)]
    DurationTooLong,

    #[error("Message cannot be blank")]
    BlankMessage,
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    Validation(#[from] LogValidationError),

    #[error("Log not found")]
    NotFound(LogId),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Invalid month: {0}. Must be between 1 and 12.")]
    InvalidPeriod(u32),

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl LogError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        LogError::Forbidden(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        LogError::InvalidState(message.into())
    }
}
