//! How navigation outside the step tree is handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy applied by the reducer when a navigation action would leave the
/// step tree.
///
/// `PassThrough` keeps the unchecked behavior: the out-of-range position is
/// stored as-is and the UI layer is trusted to guard with `is_first_step` /
/// `is_last_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    #[default]
    PassThrough,
    /// Pin the step index to the first or last step.
    Clamp,
    /// Refuse the transition and keep the current state.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bounds policy {0:?} (expected pass-through, clamp or reject)")]
pub struct UnknownBoundsPolicy(pub String);

impl BoundsPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PassThrough => "pass-through",
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundsPolicy {
    type Err = UnknownBoundsPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" | "pass_through" => Ok(Self::PassThrough),
            "clamp" => Ok(Self::Clamp),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownBoundsPolicy(s.to_string())),
        }
    }
}
