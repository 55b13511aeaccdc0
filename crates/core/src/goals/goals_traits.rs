use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::GoalAnalytics;
use crate::errors::Result;
use crate::goals::goals_model::{GoalProgress, GoalStatus, GoalUpdate, NewGoal, SavingsGoal};
use crate::milestones::Milestone;

/// Trait for goal repository operations.
///
/// Reads come straight off the store; mutations are async because the
/// storage layer serializes them through its writer.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn find(&self, goal_id: &str) -> Result<Option<SavingsGoal>>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<SavingsGoal>>;
    fn list_by_status(&self, user_id: &str, status: GoalStatus) -> Result<Vec<SavingsGoal>>;
    async fn insert(&self, new_goal: NewGoal) -> Result<SavingsGoal>;
    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<SavingsGoal>;
    async fn delete(&self, goal_id: &str) -> Result<usize>;

    /// Atomically adds `delta` to the goal's cached current amount and
    /// returns the new total. This is the only write path for the cached
    /// total; it backs the ledger-apply operation.
    async fn increment_current_amount(&self, goal_id: &str, delta: f64) -> Result<f64>;

    /// Bumps the goal's automatic-contribution streak counter.
    async fn increment_streak(&self, goal_id: &str) -> Result<()>;

    /// Adds milestone labels to the goal's achieved set. Labels already
    /// present are ignored; the set never shrinks.
    async fn add_achieved_milestones(&self, goal_id: &str, milestones: &[Milestone]) -> Result<()>;

    async fn set_status(&self, goal_id: &str, status: GoalStatus) -> Result<()>;

    /// Writes the cached analytics fields. The progress analyzer is the only
    /// caller.
    async fn update_analytics(&self, goal_id: &str, analytics: &GoalAnalytics) -> Result<()>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal>;
    fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>>;
    fn list_goals_by_status(&self, user_id: &str, status: GoalStatus) -> Result<Vec<SavingsGoal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal>;
    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<SavingsGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    async fn pause_goal(&self, goal_id: &str) -> Result<()>;
    async fn resume_goal(&self, goal_id: &str) -> Result<()>;
    fn progress(&self, goal_id: &str, as_of: DateTime<Utc>) -> Result<GoalProgress>;
}
