//! Activity labels for timed intervals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Categorical tag for a timed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLabel {
    /// Hands-on work on the vehicle
    Work,
    /// Technician break
    Break,
    /// Waiting on parts, customer approval, or a lift
    Waiting,
    /// Final inspection before handover
    QualityCheck,
}

impl ActivityLabel {
    /// All labels, in display order.
    pub const ALL: [Self; 4] = [Self::Work, Self::Break, Self::Waiting, Self::QualityCheck];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Break => "Break",
            Self::Waiting => "Waiting",
            Self::QualityCheck => "Quality Check",
        }
    }

    /// Stable identifier used in config files and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
            Self::Waiting => "waiting",
            Self::QualityCheck => "quality_check",
        }
    }

    /// Check if time under this label counts toward the job's worked time.
    #[must_use]
    pub const fn is_work(&self) -> bool {
        matches!(self, Self::Work)
    }
}

impl FromStr for ActivityLabel {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" => Ok(Self::Work),
            "break" | "b" => Ok(Self::Break),
            "waiting" | "wait" => Ok(Self::Waiting),
            "quality_check" | "quality-check" | "qc" => Ok(Self::QualityCheck),
            other => Err(ShopError::Parse(format!(
                "unknown activity '{other}' (expected work, break, waiting, quality_check)"
            ))),
        }
    }
}

impl std::fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
