use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::analytics::analytics_model::{
    AnalyticsConfig, AnalyticsRunSummary, CashflowSnapshot, GoalAnalytics, RiskLevel,
};
use crate::analytics::analytics_traits::AnalyticsServiceTrait;
use crate::errors::Result;
use crate::goals::{GoalRepositoryTrait, GoalStatus, SavingsGoal};
use async_trait::async_trait;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Computes time-vs-amount progress, sustainability, risk and suggested
/// pace for savings goals, and writes the results back to the goal's
/// cached analytics fields.
pub struct AnalyticsService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    pub fn new(goal_repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self::with_config(goal_repository, AnalyticsConfig::default())
    }

    pub fn with_config(goal_repository: Arc<dyn GoalRepositoryTrait>, config: AnalyticsConfig) -> Self {
        AnalyticsService {
            goal_repository,
            config,
        }
    }
}

#[async_trait]
impl AnalyticsServiceTrait for AnalyticsService {
    fn analyze_goal(
        &self,
        goal: &SavingsGoal,
        snapshot: &CashflowSnapshot,
        as_of: DateTime<Utc>,
    ) -> GoalAnalytics {
        let config = &self.config;
        let seconds_per_month = config.days_per_month * SECONDS_PER_DAY;

        let window = (goal.deadline - goal.start_date).num_seconds() as f64;
        let elapsed = (as_of - goal.start_date).num_seconds() as f64;
        let elapsed_fraction = if window <= 0.0 {
            1.0
        } else {
            (elapsed / window).clamp(0.0, 1.0)
        };

        // Neutral (on-track) when the goal just started and nothing is
        // expected yet.
        let expected_progress = elapsed_fraction * goal.target_amount;
        let progress_rate = if expected_progress <= 0.0 {
            1.0
        } else {
            goal.current_amount / expected_progress
        };

        let disposable_income = snapshot.disposable_income();

        let months_remaining = ((goal.deadline - as_of).num_seconds() as f64 / seconds_per_month)
            .max(config.min_months_remaining);
        let remaining_amount = (goal.target_amount - goal.current_amount).max(0.0);
        let required_monthly_amount = remaining_amount / months_remaining;

        let sustainability_score = if required_monthly_amount <= 0.0 {
            // Nothing left to save toward this goal.
            100
        } else {
            ((disposable_income / required_monthly_amount) * 100.0).clamp(0.0, 100.0) as i32
        };

        let risk_level = if progress_rate < config.high_risk_progress_threshold
            && elapsed_fraction > config.high_risk_time_threshold
        {
            RiskLevel::High
        } else if (progress_rate < config.medium_risk_progress_threshold
            && elapsed_fraction > config.medium_risk_time_threshold)
            || sustainability_score < config.low_sustainability_score
        {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let months_elapsed = elapsed.max(0.0) / seconds_per_month;
        let avg_monthly_contribution =
            (months_elapsed > 0.0).then(|| goal.current_amount / months_elapsed);

        let projected_completion_date = match avg_monthly_contribution {
            Some(avg) if avg > 0.0 => {
                let months_to_complete = remaining_amount / avg;
                as_of + Duration::seconds((months_to_complete * seconds_per_month) as i64)
            }
            _ => goal.deadline,
        };

        let multiplier = if progress_rate < config.high_risk_progress_threshold {
            config.behind_pace_multiplier
        } else if progress_rate < config.medium_risk_progress_threshold {
            config.slightly_behind_multiplier
        } else {
            1.0
        };
        let suggestion_cap = (disposable_income * config.disposable_income_cap).max(0.0);
        let next_suggested_contribution =
            (required_monthly_amount * multiplier).min(suggestion_cap).max(0.0);

        GoalAnalytics {
            sustainability_score,
            risk_level,
            projected_completion_date,
            progress_rate,
            next_suggested_contribution,
            avg_monthly_contribution,
            computed_at: as_of,
        }
    }

    async fn refresh_user_analytics(
        &self,
        user_id: &str,
        snapshot: &CashflowSnapshot,
        as_of: DateTime<Utc>,
    ) -> Result<AnalyticsRunSummary> {
        let goals = self
            .goal_repository
            .list_by_status(user_id, GoalStatus::Active)?;
        debug!(
            "Refreshing analytics for {} active goals of user {}",
            goals.len(),
            user_id
        );

        let mut summary = AnalyticsRunSummary::default();
        for goal in goals {
            let analytics = self.analyze_goal(&goal, snapshot, as_of);
            match self
                .goal_repository
                .update_analytics(&goal.id, &analytics)
                .await
            {
                Ok(()) => summary.updated += 1,
                Err(e) => {
                    warn!("Failed to update analytics for goal {}: {}", goal.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Analytics refresh for user {}: {} updated, {} failed",
            user_id, summary.updated, summary.failed
        );
        Ok(summary)
    }
}
