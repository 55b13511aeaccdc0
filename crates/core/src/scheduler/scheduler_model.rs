//! Scheduler trigger inputs and run summaries.

use serde::{Deserialize, Serialize};

/// A single income event from the transaction feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEvent {
    pub user_id: String,
    pub transaction_id: String,
    pub amount: f64,
}

/// Aggregate outcome of one scheduler pass.
///
/// Per-rule failures are logged and counted here rather than aborting the
/// batch; a failed rule keeps its schedule stamps and is retried on the
/// next trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerRunSummary {
    pub fired: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_contributed: f64,
}
