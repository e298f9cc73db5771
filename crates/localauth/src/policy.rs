use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Which authentication methods satisfy an evaluation.
///
/// Discriminants are the `LAPolicy` values and are passed to the framework
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(isize)]
pub enum Policy {
    /// Touch ID, Face ID or Optic ID only.
    BiometricsOnly = 1,
    /// Biometrics, falling back to the device passcode.
    BiometricsOrPasscode = 2,
    /// A paired Apple Watch only.
    WatchOnly = 3,
    BiometricsOrWatch = 4,
    /// Paired watch that has stayed on the wrist since it was unlocked.
    WatchWithWristDetection = 5,
}

impl Policy {
    pub const ALL: [Policy; 5] = [
        Policy::BiometricsOnly,
        Policy::BiometricsOrPasscode,
        Policy::WatchOnly,
        Policy::BiometricsOrWatch,
        Policy::WatchWithWristDetection,
    ];

    pub const fn as_raw(self) -> isize {
        self as isize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Policy::BiometricsOnly => "biometrics-only",
            Policy::BiometricsOrPasscode => "biometrics-or-passcode",
            Policy::WatchOnly => "watch-only",
            Policy::BiometricsOrWatch => "biometrics-or-watch",
            Policy::WatchWithWristDetection => "watch-with-wrist-detection",
        }
    }
}

impl TryFrom<isize> for Policy {
    type Error = PolicyError;

    fn try_from(value: isize) -> Result<Self, Self::Error> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.as_raw() == value)
            .ok_or(PolicyError::InvalidValue(value))
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Policy::ALL
            .into_iter()
            .find(|policy| policy.name() == normalized)
            .ok_or_else(|| PolicyError::UnknownName(value.to_string()))
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_match_la_policy() {
        assert_eq!(Policy::BiometricsOnly.as_raw(), 1);
        assert_eq!(Policy::BiometricsOrPasscode.as_raw(), 2);
        assert_eq!(Policy::WatchOnly.as_raw(), 3);
        assert_eq!(Policy::BiometricsOrWatch.as_raw(), 4);
        assert_eq!(Policy::WatchWithWristDetection.as_raw(), 5);
    }

    #[test]
    fn only_known_raw_values_convert() {
        for policy in Policy::ALL {
            assert_eq!(Policy::try_from(policy.as_raw()), Ok(policy));
        }
        for value in [0, 6, -1, 1004] {
            assert_eq!(Policy::try_from(value), Err(PolicyError::InvalidValue(value)));
        }
    }

    #[test]
    fn parses_names_with_either_separator() {
        assert_eq!(
            "biometrics-or-passcode".parse::<Policy>(),
            Ok(Policy::BiometricsOrPasscode)
        );
        assert_eq!(" Watch_Only ".parse::<Policy>(), Ok(Policy::WatchOnly));
        assert!(matches!(
            "face-id".parse::<Policy>(),
            Err(PolicyError::UnknownName(name)) if name == "face-id"
        ));
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Policy::WatchWithWristDetection).expect("serialize");
        assert_eq!(json, "\"watch-with-wrist-detection\"");
        let policy: Policy = serde_json::from_str("\"biometrics-or-watch\"").expect("deserialize");
        assert_eq!(policy, Policy::BiometricsOrWatch);
    }

    #[test]
    fn display_honors_padding() {
        assert_eq!(format!("{:<12}|", Policy::WatchOnly), "watch-only  |");
    }
}
