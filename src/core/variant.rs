//! Build variants of the prebuilt library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether the prebuilt artifact was compiled for debugging or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    Release,
    Debug,
}

impl BuildVariant {
    /// Variants searched after any hint, in order.
    pub const SEARCH_ORDER: [BuildVariant; 2] = [BuildVariant::Release, BuildVariant::Debug];

    /// Interpret an optional externally supplied hint.
    ///
    /// Only the exact names `release` and `debug` are honored. Anything else
    /// is dropped without a warning.
    pub fn from_hint(hint: Option<&str>) -> Option<BuildVariant> {
        hint.and_then(|h| h.parse().ok())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Release => "release",
            BuildVariant::Debug => "debug",
        }
    }

    pub fn is_debug(&self) -> bool {
        *self == BuildVariant::Debug
    }
}

impl FromStr for BuildVariant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(BuildVariant::Release),
            "debug" => Ok(BuildVariant::Debug),
            _ => Err(VariantParseError(s.to_string())),
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid build variant string.
#[derive(Debug, Clone)]
pub struct VariantParseError(pub String);

impl fmt::Display for VariantParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid build variant '{}', valid values: release, debug",
            self.0
        )
    }
}

impl std::error::Error for VariantParseError {}
