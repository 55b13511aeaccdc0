//! Milestone domain model.

use serde::{Deserialize, Serialize};

/// Fixed progress thresholds recorded once per goal.
///
/// Ordered from lowest to highest: Quarter < Half < ThreeQuarters < Complete.
/// A crossed threshold is recorded and never un-recorded, even if the goal's
/// total is later corrected downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "25%")]
    Quarter,
    #[serde(rename = "50%")]
    Half,
    #[serde(rename = "75%")]
    ThreeQuarters,
    #[serde(rename = "100%")]
    Complete,
}

impl Milestone {
    /// All milestones in ascending threshold order.
    pub const ALL: [Milestone; 4] = [
        Milestone::Quarter,
        Milestone::Half,
        Milestone::ThreeQuarters,
        Milestone::Complete,
    ];

    /// The progress fraction at which this milestone is achieved.
    pub fn threshold(&self) -> f64 {
        match self {
            Milestone::Quarter => 0.25,
            Milestone::Half => 0.50,
            Milestone::ThreeQuarters => 0.75,
            Milestone::Complete => 1.00,
        }
    }

    /// The display label stored on the goal.
    pub fn label(&self) -> &'static str {
        match self {
            Milestone::Quarter => "25%",
            Milestone::Half => "50%",
            Milestone::ThreeQuarters => "75%",
            Milestone::Complete => "100%",
        }
    }

    pub fn from_label(label: &str) -> Option<Milestone> {
        Milestone::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Thresholds at or below `progress` that are not yet in `achieved`,
    /// in ascending order.
    pub fn newly_achieved(progress: f64, achieved: &[Milestone]) -> Vec<Milestone> {
        Milestone::ALL
            .into_iter()
            .filter(|m| m.threshold() <= progress && !achieved.contains(m))
            .collect()
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
