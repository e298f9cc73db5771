use std::fmt;

use serde::{Deserialize, Serialize};

/// What the OS passed to the evaluation completion handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    /// `LAError` code, when the OS attached an error.
    pub error_code: Option<isize>,
    /// The error's localized description, for logging only.
    pub message: Option<String>,
}

impl Reply {
    pub fn success() -> Self {
        Self {
            success: true,
            error_code: None,
            message: None,
        }
    }

    pub fn failure(error_code: isize) -> Self {
        Self {
            success: false,
            error_code: Some(error_code),
            message: None,
        }
    }
}

/// Kind of biometric sensor behind the biometric policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiometryType {
    #[default]
    None,
    TouchId,
    FaceId,
    OpticId,
}

impl BiometryType {
    /// Maps a raw `LABiometryType`; unknown values read as `None`.
    pub fn from_raw(value: isize) -> Self {
        match value {
            1 => BiometryType::TouchId,
            2 => BiometryType::FaceId,
            4 => BiometryType::OpticId,
            _ => BiometryType::None,
        }
    }
}

impl fmt::Display for BiometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BiometryType::None => "none",
            BiometryType::TouchId => "Touch ID",
            BiometryType::FaceId => "Face ID",
            BiometryType::OpticId => "Optic ID",
        };
        f.pad(name)
    }
}
