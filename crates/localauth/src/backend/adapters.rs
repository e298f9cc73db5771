use std::sync::Arc;

use super::types::{BiometryType, Reply};
use crate::options::EvaluateOptions;
use crate::outcome::DenialReason;
use crate::policy::Policy;

/// Completion handler for one evaluation. Backends call it at most once;
/// dropping it without calling counts as "no reply".
pub type ReplyHandler = Box<dyn FnOnce(Reply) + Send + 'static>;

/// One OS authentication context. Opened per call, released on drop.
pub trait AuthSession: Send + Sync {
    /// Capability query; never shows UI.
    fn can_evaluate(&self, _policy: Policy) -> Result<(), DenialReason> {
        Err(DenialReason::Unspecified)
    }

    fn biometry_type(&self) -> BiometryType {
        BiometryType::None
    }

    /// Applies prompt settings. Called before `evaluate`.
    fn configure(&self, _options: &EvaluateOptions) {}

    /// Submits the request and returns without waiting. `Err` means the
    /// request could not be submitted at all.
    fn evaluate(&self, policy: Policy, reason: &str, reply: ReplyHandler) -> Result<(), String>;

    /// Dismisses a pending prompt. The session must not be reused afterwards.
    fn invalidate(&self) {}
}

pub trait AuthBackend: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn open_session(&self) -> Result<Box<dyn AuthSession>, String>;
}

pub type SharedBackend = Arc<dyn AuthBackend>;

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(any(not(target_os = "macos"), test))]
pub mod portable;
#[cfg(test)]
pub mod scripted;
