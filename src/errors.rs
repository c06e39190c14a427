//! Unified application error type.
//! All modules (store, session, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Record / blob store
    // ---------------------------
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Record store authorization failed: {0}")]
    StoreAuth(String),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    Validation(String),

    #[error("Invalid field format: {0}")]
    Format(String),

    #[error("Invalid test code")]
    InvalidCode,

    #[error("Already submitted")]
    DuplicateSubmission,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors whose full detail must stay in the internal log:
    /// infrastructure failures never leak table names, paths or upstream
    /// messages to the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::StoreUnavailable(_)
                | AppError::StoreAuth(_)
                | AppError::InvalidTimestamp(_)
                | AppError::Config(_)
                | AppError::ConfigSave
                | AppError::Other(_)
        )
    }

    /// Caller-facing message. Domain errors surface verbatim; everything
    /// internal collapses to one generic line.
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            "Request failed. Please try again later or contact support.".to_string()
        } else {
            self.to_string()
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
