use async_trait::async_trait;

use crate::contributions::contributions_model::{Contribution, ContributionSource, NewContribution};
use crate::errors::Result;

/// Trait for contribution ledger storage.
#[async_trait]
pub trait ContributionRepositoryTrait: Send + Sync {
    async fn insert(&self, new_contribution: NewContribution) -> Result<Contribution>;

    /// Contributions for a goal in reverse-chronological order.
    fn list_by_goal(&self, goal_id: &str) -> Result<Vec<Contribution>>;

    /// Sum of the goal's contributions; 0.0 when there are none.
    fn total_by_goal(&self, goal_id: &str) -> Result<f64>;
}

/// Trait for the contribution ledger service.
#[async_trait]
pub trait ContributionServiceTrait: Send + Sync {
    /// Appends a contribution and atomically updates the goal's cached
    /// total, then rechecks milestones. Concurrent calls for the same goal
    /// are serialized.
    async fn add_contribution(
        &self,
        goal_id: &str,
        user_id: &str,
        amount: f64,
        source: ContributionSource,
        transaction_id: Option<String>,
    ) -> Result<Contribution>;

    fn contributions_for_goal(&self, goal_id: &str) -> Result<Vec<Contribution>>;

    fn total_contributions(&self, goal_id: &str) -> Result<f64>;
}
