use std::sync::Arc;

use crate::backend::{default_backend, AuthSession, BiometryType, Reply, SharedBackend};
use crate::cancel::CancellationToken;
use crate::error::{AuthError, AuthResult, EvaluationError};
use crate::gate::{self, GateError};
use crate::options::EvaluateOptions;
use crate::outcome::{DenialReason, Outcome};
use crate::policy::Policy;

/// Blocking front end to the OS authentication service.
///
/// Every call opens its own session and releases it before returning, so a
/// single `Authenticator` can be shared across threads and used
/// concurrently without locking.
#[derive(Clone)]
pub struct Authenticator {
    backend: SharedBackend,
    options: EvaluateOptions,
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator {
    /// Uses the platform's native backend.
    pub fn new() -> Self {
        Self::with_backend(default_backend())
    }

    pub fn with_backend(backend: SharedBackend) -> Self {
        Self {
            backend,
            options: EvaluateOptions::default(),
        }
    }

    /// Options used by [`evaluate`](Self::evaluate) and
    /// [`evaluate_outcome`](Self::evaluate_outcome).
    pub fn with_options(mut self, options: EvaluateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    pub fn backend_id(&self) -> &str {
        self.backend.id()
    }

    /// Whether `policy` can currently be evaluated. Shows no UI and never
    /// fails; any problem reads as `false`.
    pub fn can_evaluate(&self, policy: Policy) -> bool {
        self.capability(policy).is_ok()
    }

    /// Like [`can_evaluate`](Self::can_evaluate) but keeps the OS reason.
    pub fn capability(&self, policy: Policy) -> Result<(), DenialReason> {
        let session = match self.backend.open_session() {
            Ok(session) => session,
            Err(error) => {
                tracing::debug!("capability check for {policy} skipped: {error}");
                return Err(DenialReason::SessionUnavailable);
            }
        };
        let result = session.can_evaluate(policy);
        if let Err(reason) = &result {
            tracing::debug!("policy {policy} unavailable: {reason}");
        }
        result
    }

    /// Sensor kind on this device. Runs a biometric capability query first,
    /// since the OS only fills this in after one.
    pub fn biometry_type(&self) -> BiometryType {
        match self.backend.open_session() {
            Ok(session) => {
                let _ = session.can_evaluate(Policy::BiometricsOnly);
                session.biometry_type()
            }
            Err(_) => BiometryType::None,
        }
    }

    /// Prompts the user and blocks until the OS decides.
    ///
    /// Only an explicit success from the OS is `Ok`; everything else is
    /// [`AuthError::Failed`].
    pub fn evaluate(&self, policy: Policy, reason: &str) -> AuthResult<()> {
        self.evaluate_outcome(policy, reason).into_result()
    }

    /// [`evaluate`](Self::evaluate) without collapsing the outcome.
    pub fn evaluate_outcome(&self, policy: Policy, reason: &str) -> Outcome {
        self.evaluate_with(policy, reason, &self.options, &CancellationToken::new())
    }

    /// Runs one evaluation with explicit options and a cancellation token.
    ///
    /// Cancelling `cancel`, or reaching `options.timeout`, dismisses the
    /// prompt and returns [`EvaluationError::Cancelled`] or
    /// [`EvaluationError::TimedOut`]. A reply the OS sends afterwards is
    /// dropped.
    pub fn evaluate_with(
        &self,
        policy: Policy,
        reason: &str,
        options: &EvaluateOptions,
        cancel: &CancellationToken,
    ) -> Outcome {
        let outcome = self.run_evaluation(policy, reason, options, cancel);
        log_outcome(policy, &outcome);
        outcome
    }

    /// [`evaluate`](Self::evaluate) on tokio's blocking pool.
    pub async fn evaluate_async(
        &self,
        policy: Policy,
        reason: impl Into<String>,
    ) -> AuthResult<()> {
        let authenticator = self.clone();
        let reason = reason.into();
        match tokio::task::spawn_blocking(move || authenticator.evaluate(policy, &reason)).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!("evaluation task for {policy} failed: {error}");
                Err(AuthError::Failed)
            }
        }
    }

    fn run_evaluation(
        &self,
        policy: Policy,
        reason: &str,
        options: &EvaluateOptions,
        cancel: &CancellationToken,
    ) -> Outcome {
        if let Err(error) = validate_reason(reason) {
            return Outcome::Error(error);
        }
        if cancel.is_cancelled() {
            return Outcome::Error(EvaluationError::Cancelled);
        }

        let session: Arc<dyn AuthSession> = match self.backend.open_session() {
            Ok(session) => Arc::from(session),
            Err(error) => return Outcome::Error(EvaluationError::Unavailable(error)),
        };
        tracing::debug!("evaluating {policy} on {} session", self.backend.id());
        session.configure(options);

        let (signal, waiter) = gate::one_shot::<Outcome>();

        // The hook keeps the session alive so it can still be invalidated
        // after the waiter has woken and returned.
        let cancel_signal = signal.downgrade();
        let cancel_session = session.clone();
        let _registration = cancel.on_cancel(move || {
            if cancel_signal.signal(Outcome::Error(EvaluationError::Cancelled)) {
                cancel_session.invalidate();
            }
        });

        let submitted = session.evaluate(
            policy,
            reason,
            Box::new(move |reply: Reply| {
                if let Some(message) = &reply.message {
                    tracing::debug!("reply for {policy}: {message}");
                }
                if !signal.signal(Outcome::from_reply(&reply)) {
                    tracing::debug!("late reply for {policy} ignored");
                }
            }),
        );
        if let Err(error) = submitted {
            return Outcome::Error(EvaluationError::Rejected(error));
        }

        let waited = match options.timeout() {
            Some(timeout) => waiter.wait_timeout(timeout).map_err(|error| (error, Some(timeout))),
            None => waiter.wait().map_err(|error| (error, None)),
        };
        match waited {
            Ok(outcome) => outcome,
            Err((GateError::TimedOut, Some(timeout))) => {
                session.invalidate();
                Outcome::Error(EvaluationError::TimedOut(timeout))
            }
            Err(_) => Outcome::Error(EvaluationError::NoReply),
        }
    }
}

fn validate_reason(reason: &str) -> Result<(), EvaluationError> {
    if reason.trim().is_empty() {
        return Err(EvaluationError::InvalidReason(
            "reason must not be empty".to_string(),
        ));
    }
    if reason.contains('\0') {
        return Err(EvaluationError::InvalidReason(
            "reason must not contain NUL bytes".to_string(),
        ));
    }
    Ok(())
}

fn log_outcome(policy: Policy, outcome: &Outcome) {
    match outcome {
        Outcome::Success => tracing::info!("authentication for {policy} succeeded"),
        Outcome::Denied(reason) => tracing::info!("authentication for {policy} denied: {reason}"),
        Outcome::Error(error) => tracing::warn!("authentication for {policy} failed: {error}"),
    }
}
