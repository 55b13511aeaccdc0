//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::contributions::ContributionSource;
use crate::milestones::Milestone;

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// translate them into platform-specific actions (notifications, UI refresh,
/// audit logging, etc.).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A contribution was accepted into the ledger.
    ContributionRecorded {
        goal_id: String,
        contribution_id: String,
        amount: f64,
        source: ContributionSource,
    },

    /// A goal crossed a progress threshold for the first time.
    MilestoneReached {
        goal_id: String,
        milestone: Milestone,
    },

    /// A goal reached 100% of its target and was marked Completed.
    GoalCompleted { goal_id: String },

    /// A savings rule fired and produced a contribution.
    RuleFired {
        rule_id: String,
        goal_id: String,
        amount: f64,
    },
}

impl DomainEvent {
    /// Creates a ContributionRecorded event.
    pub fn contribution_recorded(
        goal_id: impl Into<String>,
        contribution_id: impl Into<String>,
        amount: f64,
        source: ContributionSource,
    ) -> Self {
        Self::ContributionRecorded {
            goal_id: goal_id.into(),
            contribution_id: contribution_id.into(),
            amount,
            source,
        }
    }

    /// Creates a MilestoneReached event.
    pub fn milestone_reached(goal_id: impl Into<String>, milestone: Milestone) -> Self {
        Self::MilestoneReached {
            goal_id: goal_id.into(),
            milestone,
        }
    }

    /// Creates a GoalCompleted event.
    pub fn goal_completed(goal_id: impl Into<String>) -> Self {
        Self::GoalCompleted {
            goal_id: goal_id.into(),
        }
    }

    /// Creates a RuleFired event.
    pub fn rule_fired(rule_id: impl Into<String>, goal_id: impl Into<String>, amount: f64) -> Self {
        Self::RuleFired {
            rule_id: rule_id.into(),
            goal_id: goal_id.into(),
            amount,
        }
    }
}
