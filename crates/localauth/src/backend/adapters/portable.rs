use super::{AuthBackend, AuthSession};

/// Stand-in for platforms without LocalAuthentication. No session can be
/// opened, so every policy reads as unavailable.
#[derive(Debug, Default)]
pub struct PortableBackend;

impl PortableBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AuthBackend for PortableBackend {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn open_session(&self) -> Result<Box<dyn AuthSession>, String> {
        Err("local authentication is not supported on this platform".to_string())
    }
}
