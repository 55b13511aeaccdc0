use async_trait::async_trait;

use crate::errors::Result;
use crate::milestones::milestones_model::Milestone;

/// Trait for milestone tracking, invoked after every accepted contribution.
///
/// Implementations must be idempotent: re-checking a goal whose thresholds
/// are already recorded is a no-op.
#[async_trait]
pub trait MilestoneTrackerTrait: Send + Sync {
    /// Records any newly crossed thresholds for the goal and returns them in
    /// ascending order. Transitions the goal to Completed when the 100%
    /// threshold is newly crossed.
    async fn check_goal(&self, goal_id: &str) -> Result<Vec<Milestone>>;
}
