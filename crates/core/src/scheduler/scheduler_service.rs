use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::contributions::{ContributionServiceTrait, ContributionSource};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::{GoalError, GoalRepositoryTrait, GoalStatus, SavingsGoal};
use crate::rules::{RuleConfig, RuleFrequency, RuleRepositoryTrait, SavingsRule};
use crate::scheduler::scheduler_model::{IncomeEvent, SchedulerRunSummary};
use crate::scheduler::scheduler_traits::SchedulerServiceTrait;
use async_trait::async_trait;

/// Outcome of a single firing attempt.
enum FiringOutcome {
    Fired(f64),
    Skipped,
}

/// Evaluates savings rules against their triggers and applies the
/// resulting contributions.
///
/// Firing is serialized per rule id, and the rule is re-read under that
/// lock, so a pass that runs twice for the same instant cannot
/// double-contribute: the second attempt observes the advanced schedule.
/// The schedule stamp is written only after the contribution write
/// succeeded, which also makes a failed rule safe to retry on the next
/// trigger.
pub struct SchedulerService {
    rule_repository: Arc<dyn RuleRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    contribution_service: Arc<dyn ContributionServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    rule_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SchedulerService {
    pub fn new(
        rule_repository: Arc<dyn RuleRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        contribution_service: Arc<dyn ContributionServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        SchedulerService {
            rule_repository,
            goal_repository,
            contribution_service,
            event_sink,
            rule_locks: DashMap::new(),
        }
    }

    fn lock_for_rule(&self, rule_id: &str) -> Arc<Mutex<()>> {
        self.rule_locks
            .entry(rule_id.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Loads the rule's goal, skipping goals that are not accepting
    /// automatic contributions.
    fn active_goal_for(&self, rule: &SavingsRule) -> Result<Option<SavingsGoal>> {
        let goal = self
            .goal_repository
            .find(&rule.goal_id)?
            .ok_or_else(|| GoalError::NotFound(rule.goal_id.clone()))?;
        if goal.status != GoalStatus::Active {
            debug!(
                "Rule {} skipped: goal {} is {}",
                rule.id, goal.id, goal.status
            );
            return Ok(None);
        }
        Ok(Some(goal))
    }

    async fn apply_firing(
        &self,
        rule: &SavingsRule,
        goal: &SavingsGoal,
        amount: f64,
        transaction_id: Option<String>,
        last_executed: DateTime<Utc>,
        next_scheduled: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.contribution_service
            .add_contribution(
                &goal.id,
                &goal.user_id,
                amount,
                ContributionSource::Auto,
                transaction_id,
            )
            .await?;
        self.goal_repository.increment_streak(&goal.id).await?;
        self.rule_repository
            .mark_executed(&rule.id, last_executed, next_scheduled)
            .await?;
        self.event_sink
            .emit(DomainEvent::rule_fired(&rule.id, &goal.id, amount));
        Ok(())
    }

    async fn fire_income_rule(
        &self,
        rule_id: &str,
        event: &IncomeEvent,
    ) -> Result<FiringOutcome> {
        let lock = self.lock_for_rule(rule_id);
        let _guard = lock.lock().await;

        // Re-read under the lock so concurrent passes see each other's
        // stamps.
        let rule = match self.rule_repository.find(rule_id)? {
            Some(rule) => rule,
            None => return Ok(FiringOutcome::Skipped),
        };

        let amount = match rule.contribution_amount(Some(event.amount)) {
            Some(amount) => amount,
            None => return Ok(FiringOutcome::Skipped),
        };
        let goal = match self.active_goal_for(&rule)? {
            Some(goal) => goal,
            None => return Ok(FiringOutcome::Skipped),
        };

        self.apply_firing(
            &rule,
            &goal,
            amount,
            Some(event.transaction_id.clone()),
            Utc::now(),
            None,
        )
        .await?;
        Ok(FiringOutcome::Fired(amount))
    }

    async fn fire_scheduled_rule(
        &self,
        rule_id: &str,
        as_of: DateTime<Utc>,
    ) -> Result<FiringOutcome> {
        let lock = self.lock_for_rule(rule_id);
        let _guard = lock.lock().await;

        let rule = match self.rule_repository.find(rule_id)? {
            Some(rule) => rule,
            None => return Ok(FiringOutcome::Skipped),
        };
        if !rule.is_due(as_of) {
            // A concurrent tick already advanced this rule.
            return Ok(FiringOutcome::Skipped);
        }
        // Only fixed-amount rules fire on the time pass: percentage rules
        // need an income amount, and the remaining types are extension
        // points without an amount algorithm.
        if !matches!(rule.config, RuleConfig::FixedAmount { .. }) {
            return Ok(FiringOutcome::Skipped);
        }

        let amount = match rule.contribution_amount(None) {
            Some(amount) => amount,
            None => return Ok(FiringOutcome::Skipped),
        };
        let goal = match self.active_goal_for(&rule)? {
            Some(goal) => goal,
            None => return Ok(FiringOutcome::Skipped),
        };

        self.apply_firing(
            &rule,
            &goal,
            amount,
            None,
            as_of,
            rule.frequency.next_occurrence(as_of),
        )
        .await?;
        Ok(FiringOutcome::Fired(amount))
    }

    fn tally(summary: &mut SchedulerRunSummary, rule_id: &str, outcome: Result<FiringOutcome>) {
        match outcome {
            Ok(FiringOutcome::Fired(amount)) => {
                summary.fired += 1;
                summary.total_contributed += amount;
            }
            Ok(FiringOutcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                error!("Rule {} failed to fire: {}", rule_id, e);
                summary.failed += 1;
            }
        }
    }
}

#[async_trait]
impl SchedulerServiceTrait for SchedulerService {
    async fn handle_income(&self, event: &IncomeEvent) -> Result<SchedulerRunSummary> {
        let rules = self.rule_repository.income_rules_for_user(&event.user_id)?;
        debug!(
            "Income event {} for user {}: evaluating {} rules",
            event.transaction_id,
            event.user_id,
            rules.len()
        );

        let mut summary = SchedulerRunSummary::default();
        for rule in rules {
            let outcome = self.fire_income_rule(&rule.id, event).await;
            Self::tally(&mut summary, &rule.id, outcome);
        }

        info!(
            "Income pass for user {}: {} fired, {} skipped, {} failed",
            event.user_id, summary.fired, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    async fn run_tick(&self, as_of: DateTime<Utc>) -> Result<SchedulerRunSummary> {
        let mut summary = SchedulerRunSummary::default();

        for frequency in RuleFrequency::TIME_BASED {
            let due = match self.rule_repository.due_rules(frequency, as_of) {
                Ok(due) => due,
                Err(e) => {
                    error!("Failed to fetch due {} rules: {}", frequency, e);
                    summary.failed += 1;
                    continue;
                }
            };
            debug!("{} {} rules due at {}", due.len(), frequency, as_of);

            for rule in due {
                let outcome = self.fire_scheduled_rule(&rule.id, as_of).await;
                Self::tally(&mut summary, &rule.id, outcome);
            }
        }

        info!(
            "Scheduler tick at {}: {} fired, {} skipped, {} failed",
            as_of, summary.fired, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}
