//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::GoalAnalytics;
use crate::milestones::Milestone;

/// Lifecycle status of a savings goal.
///
/// `Completed` is set only by the milestone tracker when the goal reaches
/// 100% of its target; it never reverts automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl GoalStatus {
    /// Returns the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "ACTIVE",
            GoalStatus::Completed => "COMPLETED",
            GoalStatus::Paused => "PAUSED",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(GoalStatus::Active),
            "COMPLETED" => Ok(GoalStatus::Completed),
            "PAUSED" => Ok(GoalStatus::Paused),
            other => Err(format!("Unknown goal status: {}", other)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of a savings goal, ordered High > Medium > Low.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl GoalPriority {
    /// Returns the string representation of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::High => "HIGH",
            GoalPriority::Medium => "MEDIUM",
            GoalPriority::Low => "LOW",
        }
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(GoalPriority::High),
            "MEDIUM" => Ok(GoalPriority::Medium),
            "LOW" => Ok(GoalPriority::Low),
            other => Err(format!("Unknown goal priority: {}", other)),
        }
    }
}

/// How an auto-contribution policy computes its amount.
///
/// At most one mode is active per goal; the variant payload carries only the
/// parameter that mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AutoContributionMode {
    FixedAmount { amount: f64 },
    PercentageOfIncome { percentage: f64 },
}

/// Goal-level auto-contribution policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoContributionPolicy {
    pub enabled: bool,
    pub mode: Option<AutoContributionMode>,
}

/// Domain model representing a savings goal.
///
/// `current_amount` is a denormalized running total of the goal's
/// contributions, updated atomically with each ledger insert. It is never
/// edited directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub priority: GoalPriority,
    pub category_id: Option<String>,
    pub status: GoalStatus,
    pub auto_contribution: AutoContributionPolicy,
    /// Consecutive automatic contributions applied by the scheduler.
    pub contribution_streak: i32,
    /// Progress thresholds crossed so far. Grows monotonically; labels are
    /// never removed even if `current_amount` is later corrected downward.
    pub achieved_milestones: Vec<Milestone>,
    /// Cached analytics, written back by the progress analyzer only.
    pub analytics: Option<GoalAnalytics>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Computes time-vs-amount progress as of the given instant.
    pub fn progress_at(&self, as_of: DateTime<Utc>) -> GoalProgress {
        let window = (self.deadline - self.start_date).num_seconds();
        let elapsed = (as_of - self.start_date).num_seconds();
        let time_progress = if window <= 0 {
            1.0
        } else {
            (elapsed as f64 / window as f64).clamp(0.0, 1.0)
        };
        let amount_progress = if self.target_amount <= 0.0 {
            0.0
        } else {
            (self.current_amount / self.target_amount).clamp(0.0, 1.0)
        };
        GoalProgress {
            time_progress,
            amount_progress,
            is_on_track: amount_progress >= time_progress,
            remaining_amount: self.target_amount - self.current_amount,
            days_remaining: (self.deadline - as_of).num_days().max(0),
        }
    }

    /// True once the cached total has reached the target.
    pub fn is_funded(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn has_milestone(&self, milestone: Milestone) -> bool {
        self.achieved_milestones.contains(&milestone)
    }
}

/// Input model for creating a new goal.
///
/// New goals always start Active with a current amount of zero; neither is a
/// caller-supplied field.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    /// Defaults to the creation instant when unset.
    pub start_date: Option<DateTime<Utc>>,
    pub deadline: DateTime<Utc>,
    pub priority: GoalPriority,
    pub category_id: Option<String>,
    pub auto_contribution: Option<AutoContributionPolicy>,
}

/// Editable goal fields. `target_amount` is fixed at creation and
/// `current_amount` only moves through the contribution ledger, so neither
/// appears here. Status changes go through pause/resume on the service.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<GoalPriority>,
    pub category_id: Option<String>,
    pub auto_contribution: Option<AutoContributionPolicy>,
}

/// Pure computed progress snapshot; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Fraction of the goal's time window elapsed, clamped to [0, 1].
    pub time_progress: f64,
    /// Fraction of the target amount saved, clamped to [0, 1].
    pub amount_progress: f64,
    pub is_on_track: bool,
    pub remaining_amount: f64,
    pub days_remaining: i64,
}
