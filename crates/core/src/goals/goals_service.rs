use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use crate::errors::{Error, Result, ValidationError};
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{GoalProgress, GoalStatus, GoalUpdate, NewGoal, SavingsGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;

/// Service for managing savings goals.
pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repository }
    }

    fn validate_new_goal(new_goal: &NewGoal) -> Result<()> {
        if new_goal.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if new_goal.target_amount <= 0.0 {
            return Err(GoalError::InvalidAmount(new_goal.target_amount).into());
        }
        let start = new_goal.start_date.unwrap_or_else(Utc::now);
        if new_goal.deadline <= start {
            return Err(GoalError::InvalidDeadline(format!(
                "deadline {} is not after start date {}",
                new_goal.deadline, start
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal> {
        self.goal_repository
            .find(goal_id)?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()).into())
    }

    fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        self.goal_repository.list_by_user(user_id)
    }

    fn list_goals_by_status(&self, user_id: &str, status: GoalStatus) -> Result<Vec<SavingsGoal>> {
        self.goal_repository.list_by_status(user_id, status)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal> {
        Self::validate_new_goal(&new_goal)?;
        let goal = self.goal_repository.insert(new_goal).await?;
        info!("Created goal {} for user {}", goal.id, goal.user_id);
        Ok(goal)
    }

    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<SavingsGoal> {
        let existing = self.get_goal(goal_id)?;

        if let Some(ref name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    "name".to_string(),
                )));
            }
        }
        if let Some(deadline) = update.deadline {
            if deadline <= existing.start_date {
                return Err(GoalError::InvalidDeadline(format!(
                    "deadline {} is not after start date {}",
                    deadline, existing.start_date
                ))
                .into());
            }
        }

        self.goal_repository.update(goal_id, update).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.goal_repository.delete(goal_id).await
    }

    /// Explicit user action; the scheduler never pauses goals.
    async fn pause_goal(&self, goal_id: &str) -> Result<()> {
        let _ = self.get_goal(goal_id)?;
        self.goal_repository
            .set_status(goal_id, GoalStatus::Paused)
            .await
    }

    async fn resume_goal(&self, goal_id: &str) -> Result<()> {
        let _ = self.get_goal(goal_id)?;
        self.goal_repository
            .set_status(goal_id, GoalStatus::Active)
            .await
    }

    fn progress(&self, goal_id: &str, as_of: DateTime<Utc>) -> Result<GoalProgress> {
        Ok(self.get_goal(goal_id)?.progress_at(as_of))
    }
}
