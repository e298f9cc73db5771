use crate::backend::Reply;
use crate::error::{AuthError, EvaluationError};

/// Result of a single evaluation before it is collapsed to pass/fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The OS answered and the answer was no.
    Denied(DenialReason),
    /// The OS never answered.
    Error(EvaluationError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Everything other than [`Outcome::Success`] becomes [`AuthError::Failed`].
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Outcome::Success => Ok(()),
            Outcome::Denied(_) | Outcome::Error(_) => Err(AuthError::Failed),
        }
    }

    pub(crate) fn from_reply(reply: &Reply) -> Self {
        if reply.success {
            return Outcome::Success;
        }
        Outcome::Denied(
            reply
                .error_code
                .map(DenialReason::from_code)
                .unwrap_or(DenialReason::Unspecified),
        )
    }
}

/// `LAError` codes reported alongside a failed evaluation or capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DenialReason {
    #[error("credentials were not valid")]
    AuthenticationFailed,
    #[error("cancelled by the user")]
    UserCancel,
    #[error("user chose the fallback button")]
    UserFallback,
    #[error("cancelled by the system")]
    SystemCancel,
    #[error("no passcode is set on the device")]
    PasscodeNotSet,
    #[error("biometry is not available")]
    BiometryNotAvailable,
    #[error("no biometric identities are enrolled")]
    BiometryNotEnrolled,
    #[error("biometry is locked out")]
    BiometryLockout,
    #[error("cancelled by the application")]
    AppCancel,
    #[error("the context was invalidated")]
    InvalidContext,
    #[error("no paired watch is available")]
    WatchNotAvailable,
    #[error("no paired biometric accessory")]
    BiometryNotPaired,
    #[error("biometric accessory is disconnected")]
    BiometryDisconnected,
    #[error("invalid dimensions")]
    InvalidDimensions,
    #[error("interaction is not allowed")]
    NotInteractive,
    #[error("the OS reported no reason")]
    Unspecified,
    #[error("no authentication session could be opened")]
    SessionUnavailable,
    #[error("unrecognized error code {0}")]
    Other(isize),
}

impl DenialReason {
    pub fn from_code(code: isize) -> Self {
        match code {
            -1 => DenialReason::AuthenticationFailed,
            -2 => DenialReason::UserCancel,
            -3 => DenialReason::UserFallback,
            -4 => DenialReason::SystemCancel,
            -5 => DenialReason::PasscodeNotSet,
            -6 => DenialReason::BiometryNotAvailable,
            -7 => DenialReason::BiometryNotEnrolled,
            -8 => DenialReason::BiometryLockout,
            -9 => DenialReason::AppCancel,
            -10 => DenialReason::InvalidContext,
            -11 => DenialReason::WatchNotAvailable,
            -12 => DenialReason::BiometryNotPaired,
            -13 => DenialReason::BiometryDisconnected,
            -14 => DenialReason::InvalidDimensions,
            -1004 => DenialReason::NotInteractive,
            other => DenialReason::Other(other),
        }
    }

    /// The `LAError` code, if this reason has one.
    pub fn code(self) -> Option<isize> {
        let code = match self {
            DenialReason::AuthenticationFailed => -1,
            DenialReason::UserCancel => -2,
            DenialReason::UserFallback => -3,
            DenialReason::SystemCancel => -4,
            DenialReason::PasscodeNotSet => -5,
            DenialReason::BiometryNotAvailable => -6,
            DenialReason::BiometryNotEnrolled => -7,
            DenialReason::BiometryLockout => -8,
            DenialReason::AppCancel => -9,
            DenialReason::InvalidContext => -10,
            DenialReason::WatchNotAvailable => -11,
            DenialReason::BiometryNotPaired => -12,
            DenialReason::BiometryDisconnected => -13,
            DenialReason::InvalidDimensions => -14,
            DenialReason::NotInteractive => -1004,
            DenialReason::Other(code) => code,
            DenialReason::Unspecified | DenialReason::SessionUnavailable => return None,
        };
        Some(code)
    }

    /// Whether the prompt was dismissed rather than failed.
    pub fn is_cancellation(self) -> bool {
        matches!(
            self,
            DenialReason::UserCancel | DenialReason::SystemCancel | DenialReason::AppCancel
        )
    }
}
