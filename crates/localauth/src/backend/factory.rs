use std::sync::Arc;

use super::adapters::SharedBackend;

pub fn default_backend() -> SharedBackend {
    #[cfg(target_os = "macos")]
    {
        Arc::new(super::adapters::macos::MacosBackend::new())
    }

    #[cfg(not(target_os = "macos"))]
    {
        Arc::new(super::adapters::portable::PortableBackend::new())
    }
}
