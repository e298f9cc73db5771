//! Touch ID, Face ID, passcode and Apple Watch authentication through the
//! macOS LocalAuthentication framework.
//!
//! The framework reports evaluation results through a completion block on
//! its own queue. [`Authenticator`] turns that into a plain blocking call:
//!
//! - [`Authenticator::can_evaluate`] asks whether a [`Policy`] is usable
//!   right now, without showing any UI.
//! - [`Authenticator::evaluate`] shows the system prompt and blocks until the
//!   user finishes, returning `Ok(())` only on an explicit success.
//!
//! [`Authenticator::evaluate_outcome`] and [`Authenticator::evaluate_with`]
//! expose the uncollapsed [`Outcome`], per-call [`EvaluateOptions`] and
//! [`CancellationToken`] support. On platforms other than macOS the default
//! backend reports every policy as unavailable.

mod authenticator;
pub mod backend;
pub mod cancel;
pub mod error;
pub mod gate;
mod options;
mod outcome;
mod policy;

pub use authenticator::Authenticator;
pub use backend::{default_backend, AuthBackend, AuthSession, BiometryType, Reply, SharedBackend};
pub use cancel::CancellationToken;
pub use error::{AuthError, AuthResult, ConfigError, EvaluationError, PolicyError};
pub use options::{EvaluateOptions, MAX_REUSE_DURATION};
pub use outcome::{DenialReason, Outcome};
pub use policy::Policy;
