mod adapters;
pub mod factory;
pub mod types;

pub use adapters::{AuthBackend, AuthSession, ReplyHandler, SharedBackend};
pub use factory::default_backend;
pub use types::{BiometryType, Reply};

#[cfg(target_os = "macos")]
pub use adapters::macos::MacosBackend;
#[cfg(not(target_os = "macos"))]
pub use adapters::portable::PortableBackend;

#[cfg(test)]
pub(crate) use adapters::scripted;
