use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::analytics_model::{AnalyticsRunSummary, CashflowSnapshot, GoalAnalytics};
use crate::errors::Result;
use crate::goals::SavingsGoal;

/// Trait for the progress & risk analyzer.
#[async_trait]
pub trait AnalyticsServiceTrait: Send + Sync {
    /// Pure computation of a goal's derived metrics; does not persist.
    fn analyze_goal(
        &self,
        goal: &SavingsGoal,
        snapshot: &CashflowSnapshot,
        as_of: DateTime<Utc>,
    ) -> GoalAnalytics;

    /// Recomputes and writes back analytics for every Active goal of the
    /// user. Per-goal failures are logged and counted, not propagated.
    async fn refresh_user_analytics(
        &self,
        user_id: &str,
        snapshot: &CashflowSnapshot,
        as_of: DateTime<Utc>,
    ) -> Result<AnalyticsRunSummary>;
}
