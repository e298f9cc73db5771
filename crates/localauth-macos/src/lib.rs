//! Objective-C bridge to `LAContext` from the LocalAuthentication framework.
//!
//! Everything here is a thin wrapper: one [`Context`] per OS handle, raw
//! `LAPolicy`/`LAError`/`LABiometryType` integers in and out, and `String`
//! errors. Mapping those integers to typed values is left to callers.
#![cfg(target_os = "macos")]

mod context;
mod util;

pub use context::{Context, Reply, MAX_REUSE_DURATION_SECS};
