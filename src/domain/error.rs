//! Domain error types for the registry.
//!
//! Every failure aborts only the operation that raised it. Front ends render
//! these as a message box (or a stderr line) using `title()` and `severity()`.

use thiserror::Error;

/// How loudly a front end should surface a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Errors raised while registering or listing people.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("All fields must be filled in.")]
    MissingFields,

    #[error("Age must be a positive whole number (got {0:?}).")]
    InvalidAge(String),

    #[error("Sex must be one of {choices} (got {0:?}).", choices = crate::domain::Sex::choices())]
    UnknownSex(String),

    #[error("Could not open the database or create the table: {0:#}")]
    StorageUnavailable(anyhow::Error),

    #[error("Could not insert the record: {0:#}")]
    WriteFailed(anyhow::Error),

    #[error("Could not read the records: {0:#}")]
    ReadFailed(anyhow::Error),
}

impl RegistrationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingFields => "Attention",
            Self::InvalidAge(_) => "Age error",
            Self::UnknownSex(_) => "Sex error",
            Self::StorageUnavailable(_) => "Database error",
            Self::WriteFailed(_) => "Insert error",
            Self::ReadFailed(_) => "Read error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingFields => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// True for errors caused by the submitted input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFields | Self::InvalidAge(_) | Self::UnknownSex(_)
        )
    }
}
