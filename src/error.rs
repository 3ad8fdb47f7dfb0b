//! Error types for daybook

use thiserror::Error;

/// Main error type for the daybook data model
#[derive(Debug, Error)]
pub enum DaybookError {
    #[error("Invalid calendar date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Day text is not valid UTF-8: {0}")]
    TextDecode(#[from] std::string::FromUtf8Error),
}

/// Result type using DaybookError
pub type Result<T> = std::result::Result<T, DaybookError>;
