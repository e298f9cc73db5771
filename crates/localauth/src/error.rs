use std::time::Duration;

/// The only error [`crate::Authenticator::evaluate`] reports.
///
/// Cancellation, lockout, missing enrollment and a request that never
/// started all collapse here. Use [`crate::Authenticator::evaluate_outcome`]
/// when the distinction matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authentication failed")]
    Failed,
}

/// Why an evaluation ended without a verdict from the OS.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("invalid reason: {0}")]
    InvalidReason(String),

    #[error("authentication unavailable: {0}")]
    Unavailable(String),

    #[error("evaluation rejected: {0}")]
    Rejected(String),

    #[error("evaluation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("evaluation cancelled")]
    Cancelled,

    #[error("no reply received")]
    NoReply,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid policy value: {0}")]
    InvalidValue(isize),

    #[error("unknown policy: {0}")]
    UnknownName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Result type alias using [`AuthError`].
pub type AuthResult<T> = Result<T, AuthError>;
