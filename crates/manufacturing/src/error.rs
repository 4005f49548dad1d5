use thiserror::Error;

use millwright_core::DomainError;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Failures surfaced by workspace controllers.
///
/// `Domain` errors are user-correctable (the form stays open); the others are
/// host programming errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("no detail line {0} on this order")]
    UnknownLine(u32),

    #[error("quantity dialog is not open")]
    NoDialogTarget,

    #[error("workspace already closed")]
    Closed,
}

impl WorkflowError {
    /// Whether this came from order validation rather than host misuse.
    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Domain(e) if e.is_recoverable())
    }
}
