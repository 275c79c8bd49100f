//! Error types for the Solenoid front end.

use thiserror::Error;

/// All errors that can be produced by the Solenoid front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolenoidError {
    /// Parsing cannot continue.  The diagnostic describing the failure has
    /// already been recorded in the parser's
    /// [`ErrorReporter`](crate::diagnostics::ErrorReporter); the payload
    /// repeats its message.
    #[error("fatal parse error: {0}")]
    FatalParse(String),
}

/// Convenient `Result` alias for fallible front-end operations.
pub type SolenoidResult<T> = Result<T, SolenoidError>;
