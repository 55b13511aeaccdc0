use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::contributions::contributions_model::{
    Contribution, ContributionSource, NewContribution,
};
use crate::contributions::contributions_traits::{
    ContributionRepositoryTrait, ContributionServiceTrait,
};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::{GoalError, GoalRepositoryTrait};
use crate::milestones::MilestoneTrackerTrait;
use async_trait::async_trait;

/// Service for the contribution ledger.
///
/// Holds a per-goal lock registry so the insert + cached-total increment +
/// milestone recheck sequence is serialized per goal; contributions to
/// different goals proceed in parallel.
pub struct ContributionService {
    contribution_repository: Arc<dyn ContributionRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    milestone_tracker: Arc<dyn MilestoneTrackerTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    goal_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ContributionService {
    pub fn new(
        contribution_repository: Arc<dyn ContributionRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        milestone_tracker: Arc<dyn MilestoneTrackerTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        ContributionService {
            contribution_repository,
            goal_repository,
            milestone_tracker,
            event_sink,
            goal_locks: DashMap::new(),
        }
    }

    fn lock_for_goal(&self, goal_id: &str) -> Arc<Mutex<()>> {
        self.goal_locks
            .entry(goal_id.to_string())
            .or_default()
            .value()
            .clone()
    }
}

#[async_trait]
impl ContributionServiceTrait for ContributionService {
    async fn add_contribution(
        &self,
        goal_id: &str,
        user_id: &str,
        amount: f64,
        source: ContributionSource,
        transaction_id: Option<String>,
    ) -> Result<Contribution> {
        if amount <= 0.0 {
            return Err(GoalError::InvalidAmount(amount).into());
        }

        let lock = self.lock_for_goal(goal_id);
        let _guard = lock.lock().await;

        let goal = self
            .goal_repository
            .find(goal_id)?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()))?;

        let contribution = self
            .contribution_repository
            .insert(NewContribution {
                id: None,
                goal_id: goal.id.clone(),
                user_id: user_id.to_string(),
                amount,
                timestamp: None,
                source,
                transaction_id,
            })
            .await?;

        let new_total = self
            .goal_repository
            .increment_current_amount(goal_id, amount)
            .await?;
        debug!(
            "Applied {} {} to goal {}; total is now {}",
            source.as_str(),
            amount,
            goal_id,
            new_total
        );

        self.milestone_tracker.check_goal(goal_id).await?;

        self.event_sink.emit(DomainEvent::contribution_recorded(
            goal_id,
            contribution.id.clone(),
            amount,
            source,
        ));

        Ok(contribution)
    }

    fn contributions_for_goal(&self, goal_id: &str) -> Result<Vec<Contribution>> {
        self.contribution_repository.list_by_goal(goal_id)
    }

    fn total_contributions(&self, goal_id: &str) -> Result<f64> {
        self.contribution_repository.total_by_goal(goal_id)
    }
}
