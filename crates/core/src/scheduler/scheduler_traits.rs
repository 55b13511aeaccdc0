use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::scheduler::scheduler_model::{IncomeEvent, SchedulerRunSummary};

/// Trait for the rule scheduler.
///
/// Both passes are idempotent and safe to invoke concurrently: firing is
/// serialized per rule, and a rule's schedule is only advanced after its
/// contribution was written.
#[async_trait]
pub trait SchedulerServiceTrait: Send + Sync {
    /// Income-triggered pass: evaluates every enabled EveryIncome rule of
    /// the user's goals against the event amount.
    async fn handle_income(&self, event: &IncomeEvent) -> Result<SchedulerRunSummary>;

    /// Time-triggered pass: fires due Daily/Weekly/Monthly rules as of the
    /// given instant.
    async fn run_tick(&self, as_of: DateTime<Utc>) -> Result<SchedulerRunSummary>;
}
