//! Error types for stay-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StayError {
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StayError>;
