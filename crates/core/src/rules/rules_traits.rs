use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::rules::rules_model::{NewRule, RuleFrequency, RuleUpdate, SavingsRule};

/// Trait for rule repository operations.
#[async_trait]
pub trait RuleRepositoryTrait: Send + Sync {
    fn find(&self, rule_id: &str) -> Result<Option<SavingsRule>>;
    fn list_by_goal(&self, goal_id: &str) -> Result<Vec<SavingsRule>>;

    /// Enabled rules of the given time-based frequency whose
    /// `next_scheduled` has passed (or is unset, treated as immediately
    /// due).
    fn due_rules(&self, frequency: RuleFrequency, as_of: DateTime<Utc>) -> Result<Vec<SavingsRule>>;

    /// Enabled EveryIncome rules attached to the user's goals.
    fn income_rules_for_user(&self, user_id: &str) -> Result<Vec<SavingsRule>>;

    async fn insert(&self, new_rule: NewRule) -> Result<SavingsRule>;
    async fn update(&self, rule_id: &str, update: RuleUpdate) -> Result<SavingsRule>;
    async fn delete(&self, rule_id: &str) -> Result<usize>;
    async fn set_enabled(&self, rule_id: &str, enabled: bool) -> Result<()>;

    /// Stamps `last_executed` and `next_scheduled` in one write. Only the
    /// scheduler calls this, and only after the contribution write
    /// succeeded.
    async fn mark_executed(
        &self,
        rule_id: &str,
        last_executed: DateTime<Utc>,
        next_scheduled: Option<DateTime<Utc>>,
    ) -> Result<()>;
}

/// Trait for rule service operations.
#[async_trait]
pub trait RuleServiceTrait: Send + Sync {
    fn get_rule(&self, rule_id: &str) -> Result<SavingsRule>;
    fn list_rules(&self, goal_id: &str) -> Result<Vec<SavingsRule>>;
    async fn create_rule(&self, new_rule: NewRule) -> Result<SavingsRule>;
    async fn update_rule(&self, rule_id: &str, update: RuleUpdate) -> Result<SavingsRule>;
    async fn delete_rule(&self, rule_id: &str) -> Result<usize>;
    async fn enable_rule(&self, rule_id: &str) -> Result<()>;
    async fn disable_rule(&self, rule_id: &str) -> Result<()>;
}
