//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is not found in the record store.
//! - [`ExistingKey`] thrown when an insert would duplicate an existing item.
//! - [`MissingTask`] thrown when a quick-edit session is committed without a task.
//! - [`Store`] thrown when a record store round trip fails.
//! - [`Render`] thrown when an export cannot be written out.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`MissingTask`]: EngineError::MissingTask
//!  [`Store`]: EngineError::Store
//!  [`Render`]: EngineError::Render
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("La tâche est requise")]
    MissingTask,
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Session state: {0}")]
    SessionState(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Record store failure: {0}")]
    Store(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::MissingTask, Self::MissingTask) => true,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidStatus(a), Self::InvalidStatus(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::SessionState(a), Self::SessionState(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Render(a), Self::Render(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(value: csv::Error) -> Self {
        Self::Render(value.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value.to_string())
    }
}
