use log::info;
use std::sync::Arc;

use crate::errors::Result;
use crate::goals::{GoalError, GoalRepositoryTrait};
use crate::rules::rules_errors::RuleError;
use crate::rules::rules_model::{NewRule, RuleUpdate, SavingsRule};
use crate::rules::rules_traits::{RuleRepositoryTrait, RuleServiceTrait};
use async_trait::async_trait;

/// Service for managing savings rules.
///
/// All rule configurations are validated here, at the boundary, so the
/// scheduler only ever sees well-formed rules.
pub struct RuleService {
    rule_repository: Arc<dyn RuleRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl RuleService {
    pub fn new(
        rule_repository: Arc<dyn RuleRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        RuleService {
            rule_repository,
            goal_repository,
        }
    }
}

#[async_trait]
impl RuleServiceTrait for RuleService {
    fn get_rule(&self, rule_id: &str) -> Result<SavingsRule> {
        self.rule_repository
            .find(rule_id)?
            .ok_or_else(|| RuleError::NotFound(rule_id.to_string()).into())
    }

    fn list_rules(&self, goal_id: &str) -> Result<Vec<SavingsRule>> {
        self.rule_repository.list_by_goal(goal_id)
    }

    async fn create_rule(&self, new_rule: NewRule) -> Result<SavingsRule> {
        new_rule.validate()?;
        if self.goal_repository.find(&new_rule.goal_id)?.is_none() {
            return Err(GoalError::NotFound(new_rule.goal_id.clone()).into());
        }

        let rule = self.rule_repository.insert(new_rule).await?;
        info!(
            "Created {} rule {} for goal {}",
            rule.config.type_name(),
            rule.id,
            rule.goal_id
        );
        Ok(rule)
    }

    async fn update_rule(&self, rule_id: &str, update: RuleUpdate) -> Result<SavingsRule> {
        let existing = self.get_rule(rule_id)?;

        if let Some(config) = update.config {
            config.validate()?;
        }
        if let Some(ref description) = update.description {
            if description.trim().is_empty() {
                return Err(RuleError::MissingDescription.into());
            }
        }
        if let Some(threshold) = update.minimum_income_threshold {
            if threshold < 0.0 {
                return Err(RuleError::InconsistentConfig(format!(
                    "minimum income threshold {} must not be negative",
                    threshold
                ))
                .into());
            }
        }
        if let Some(cap) = update.maximum_contribution {
            if cap <= 0.0 {
                return Err(RuleError::InconsistentConfig(format!(
                    "maximum contribution {} must be positive",
                    cap
                ))
                .into());
            }
        }

        self.rule_repository.update(&existing.id, update).await
    }

    async fn delete_rule(&self, rule_id: &str) -> Result<usize> {
        self.rule_repository.delete(rule_id).await
    }

    async fn enable_rule(&self, rule_id: &str) -> Result<()> {
        let _ = self.get_rule(rule_id)?;
        self.rule_repository.set_enabled(rule_id, true).await
    }

    async fn disable_rule(&self, rule_id: &str) -> Result<()> {
        let _ = self.get_rule(rule_id)?;
        self.rule_repository.set_enabled(rule_id, false).await
    }
}
