use log::{debug, info};
use std::sync::Arc;

use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::{GoalError, GoalRepositoryTrait, GoalStatus};
use crate::milestones::milestones_model::Milestone;
use crate::milestones::milestones_traits::MilestoneTrackerTrait;
use async_trait::async_trait;

/// Detects newly crossed progress thresholds and records them on the goal.
///
/// Runs after every accepted contribution. Redundant invocations are safe:
/// already-recorded thresholds are skipped and the Completed transition only
/// happens on the first crossing of 100%.
pub struct MilestoneTracker {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl MilestoneTracker {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        MilestoneTracker {
            goal_repository,
            event_sink,
        }
    }
}

#[async_trait]
impl MilestoneTrackerTrait for MilestoneTracker {
    async fn check_goal(&self, goal_id: &str) -> Result<Vec<Milestone>> {
        let goal = self
            .goal_repository
            .find(goal_id)?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()))?;

        if goal.target_amount <= 0.0 {
            return Ok(Vec::new());
        }

        let progress = goal.current_amount / goal.target_amount;
        let newly = Milestone::newly_achieved(progress, &goal.achieved_milestones);
        if newly.is_empty() {
            debug!("No new milestones for goal {}", goal_id);
            return Ok(newly);
        }

        self.goal_repository
            .add_achieved_milestones(goal_id, &newly)
            .await?;

        for milestone in &newly {
            info!("Goal {} reached milestone {}", goal_id, milestone);
            self.event_sink
                .emit(DomainEvent::milestone_reached(goal_id, *milestone));
        }

        if newly.contains(&Milestone::Complete) && goal.status != GoalStatus::Completed {
            self.goal_repository
                .set_status(goal_id, GoalStatus::Completed)
                .await?;
            info!("Goal {} completed", goal_id);
            self.event_sink.emit(DomainEvent::goal_completed(goal_id));
        }

        Ok(newly)
    }
}
