//! Predicted risk level and its presentation tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk level decoded from the label encoder, e.g. `"Low"` or `"High"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskLabel(String);

impl RiskLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tier(&self) -> RiskTier {
        RiskTier::from_label(&self.0)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display tier selected from a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    High,
    Medium,
    /// Default for `"low"` and for any label not matching the other tiers.
    Low,
}

impl RiskTier {
    /// Case-insensitive match on `"high"` / `"medium"`; everything else is `Low`.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("high") {
            Self::High
        } else if label.eq_ignore_ascii_case("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn color_name(&self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "orange",
            Self::Low => "green",
        }
    }
}
