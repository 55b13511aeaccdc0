//! Contribution domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionSource {
    Manual,
    Auto,
    MilestoneReward,
}

impl ContributionSource {
    /// Returns the string representation of this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionSource::Manual => "MANUAL",
            ContributionSource::Auto => "AUTO",
            ContributionSource::MilestoneReward => "MILESTONE_REWARD",
        }
    }
}

impl std::str::FromStr for ContributionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(ContributionSource::Manual),
            "AUTO" => Ok(ContributionSource::Auto),
            "MILESTONE_REWARD" => Ok(ContributionSource::MilestoneReward),
            other => Err(format!("Unknown contribution source: {}", other)),
        }
    }
}

/// A single recorded addition of money toward a goal.
///
/// Immutable once created; the ledger is append-only and the sum of a
/// goal's contributions is the authoritative current amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub source: ContributionSource,
    /// Link to the income transaction that triggered an automatic
    /// contribution, when there is one.
    pub transaction_id: Option<String>,
}

/// Input model for appending a contribution.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub id: Option<String>,
    pub goal_id: String,
    pub user_id: String,
    pub amount: f64,
    /// Defaults to the insertion instant when unset.
    pub timestamp: Option<DateTime<Utc>>,
    pub source: ContributionSource,
    pub transaction_id: Option<String>,
}
