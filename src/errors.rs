use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for navigation, wizard, and storage layers.
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Navigation precondition violated: {0}")]
    NavigationPrecondition(String),
    #[error("Step {step} did not pass validation")]
    ValidationRejected { step: usize },
    #[error("Entry was not saved: {0}")]
    PersistenceRejected(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage format error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, DiaryError>;

impl DiaryError {
    /// Errors the end user is expected to see as a transient notice.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DiaryError::PersistenceRejected(_) | DiaryError::InvalidInput(_)
        )
    }
}
