use localauth_macos::Context;

use super::{AuthBackend, AuthSession, ReplyHandler};
use crate::backend::types::{BiometryType, Reply};
use crate::options::EvaluateOptions;
use crate::outcome::DenialReason;
use crate::policy::Policy;

/// `LAContext`-backed sessions.
#[derive(Debug, Default)]
pub struct MacosBackend;

impl MacosBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AuthBackend for MacosBackend {
    fn id(&self) -> &str {
        "macos"
    }

    fn open_session(&self) -> Result<Box<dyn AuthSession>, String> {
        let context = Context::new()?;
        Ok(Box::new(MacosSession { context }))
    }
}

struct MacosSession {
    context: Context,
}

impl AuthSession for MacosSession {
    fn can_evaluate(&self, policy: Policy) -> Result<(), DenialReason> {
        self.context
            .can_evaluate_policy(policy.as_raw())
            .map_err(|code| {
                code.map(DenialReason::from_code)
                    .unwrap_or(DenialReason::Unspecified)
            })
    }

    fn biometry_type(&self) -> BiometryType {
        BiometryType::from_raw(self.context.biometry_type())
    }

    fn configure(&self, options: &EvaluateOptions) {
        if let Some(title) = options.cancel_title.as_deref() {
            self.context.set_localized_cancel_title(title);
        }
        if let Some(title) = options.fallback_title.as_deref() {
            self.context.set_localized_fallback_title(title);
        }
        if let Some(duration) = options.reuse_duration() {
            self.context.set_reuse_duration(duration.as_secs_f64());
        }
    }

    fn evaluate(&self, policy: Policy, reason: &str, reply: ReplyHandler) -> Result<(), String> {
        self.context
            .evaluate_policy(policy.as_raw(), reason, move |native| {
                reply(Reply {
                    success: native.success,
                    error_code: native.error_code,
                    message: native.message,
                })
            });
        Ok(())
    }

    fn invalidate(&self) {
        self.context.invalidate();
    }
}
