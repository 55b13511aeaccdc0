#[cfg(test)]
mod tests {
    use crate::analytics::GoalAnalytics;
    use crate::errors::{Error, Result};
    use crate::goals::{
        AutoContributionPolicy, GoalError, GoalPriority, GoalRepositoryTrait, GoalStatus,
        GoalUpdate, NewGoal, SavingsGoal,
    };
    use crate::milestones::Milestone;
    use crate::rules::rules_model::*;
    use crate::rules::{RuleError, RuleRepositoryTrait, RuleService, RuleServiceTrait};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    // --- Mock RuleRepository ---
    #[derive(Clone, Default)]
    struct MockRuleRepository {
        rules: Arc<Mutex<Vec<SavingsRule>>>,
    }

    impl MockRuleRepository {
        fn stored(&self, rule_id: &str) -> SavingsRule {
            self.rules
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == rule_id)
                .cloned()
                .unwrap()
        }
    }

    #[async_trait]
    impl RuleRepositoryTrait for MockRuleRepository {
        fn find(&self, rule_id: &str) -> Result<Option<SavingsRule>> {
            Ok(self
                .rules
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == rule_id)
                .cloned())
        }

        fn list_by_goal(&self, goal_id: &str) -> Result<Vec<SavingsRule>> {
            Ok(self
                .rules
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.goal_id == goal_id)
                .cloned()
                .collect())
        }

        fn due_rules(
            &self,
            frequency: RuleFrequency,
            as_of: DateTime<Utc>,
        ) -> Result<Vec<SavingsRule>> {
            Ok(self
                .rules
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.frequency == frequency && r.is_due(as_of))
                .cloned()
                .collect())
        }

        fn income_rules_for_user(&self, _user_id: &str) -> Result<Vec<SavingsRule>> {
            Ok(self
                .rules
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.frequency == RuleFrequency::EveryIncome && r.enabled)
                .cloned()
                .collect())
        }

        async fn insert(&self, new_rule: NewRule) -> Result<SavingsRule> {
            let mut rules = self.rules.lock().unwrap();
            let now = Utc::now();
            let rule = SavingsRule {
                id: new_rule
                    .id
                    .unwrap_or_else(|| format!("rule-{}", rules.len() + 1)),
                goal_id: new_rule.goal_id,
                config: new_rule.config,
                frequency: new_rule.frequency,
                minimum_income_threshold: new_rule.minimum_income_threshold,
                maximum_contribution: new_rule.maximum_contribution,
                enabled: new_rule.enabled,
                description: new_rule.description,
                last_executed: None,
                next_scheduled: None,
                created_at: now,
                updated_at: now,
            };
            rules.push(rule.clone());
            Ok(rule)
        }

        async fn update(&self, rule_id: &str, update: RuleUpdate) -> Result<SavingsRule> {
            let mut rules = self.rules.lock().unwrap();
            let rule = rules
                .iter_mut()
                .find(|r| r.id == rule_id)
                .ok_or_else(|| Error::from(RuleError::NotFound(rule_id.to_string())))?;
            if let Some(config) = update.config {
                rule.config = config;
            }
            if let Some(frequency) = update.frequency {
                rule.frequency = frequency;
            }
            if let Some(threshold) = update.minimum_income_threshold {
                rule.minimum_income_threshold = Some(threshold);
            }
            if let Some(cap) = update.maximum_contribution {
                rule.maximum_contribution = Some(cap);
            }
            if let Some(description) = update.description {
                rule.description = description;
            }
            Ok(rule.clone())
        }

        async fn delete(&self, rule_id: &str) -> Result<usize> {
            let mut rules = self.rules.lock().unwrap();
            let before = rules.len();
            rules.retain(|r| r.id != rule_id);
            Ok(before - rules.len())
        }

        async fn set_enabled(&self, rule_id: &str, enabled: bool) -> Result<()> {
            let mut rules = self.rules.lock().unwrap();
            if let Some(rule) = rules.iter_mut().find(|r| r.id == rule_id) {
                rule.enabled = enabled;
            }
            Ok(())
        }

        async fn mark_executed(
            &self,
            rule_id: &str,
            last_executed: DateTime<Utc>,
            next_scheduled: Option<DateTime<Utc>>,
        ) -> Result<()> {
            let mut rules = self.rules.lock().unwrap();
            if let Some(rule) = rules.iter_mut().find(|r| r.id == rule_id) {
                rule.last_executed = Some(last_executed);
                rule.next_scheduled = next_scheduled;
            }
            Ok(())
        }
    }

    // --- Mock GoalRepository (lookup only) ---
    #[derive(Clone, Default)]
    struct MockGoalRepository {
        goals: Arc<Mutex<Vec<SavingsGoal>>>,
    }

    impl MockGoalRepository {
        fn with_goal(goal: SavingsGoal) -> Self {
            let repo = Self::default();
            repo.goals.lock().unwrap().push(goal);
            repo
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn find(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
            Ok(self
                .goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id)
                .cloned())
        }

        fn list_by_user(&self, _user_id: &str) -> Result<Vec<SavingsGoal>> {
            unimplemented!()
        }

        fn list_by_status(&self, _user_id: &str, _status: GoalStatus) -> Result<Vec<SavingsGoal>> {
            unimplemented!()
        }

        async fn insert(&self, _new_goal: NewGoal) -> Result<SavingsGoal> {
            unimplemented!()
        }

        async fn update(&self, _goal_id: &str, _update: GoalUpdate) -> Result<SavingsGoal> {
            unimplemented!()
        }

        async fn delete(&self, _goal_id: &str) -> Result<usize> {
            unimplemented!()
        }

        async fn increment_current_amount(&self, _goal_id: &str, _delta: f64) -> Result<f64> {
            unimplemented!()
        }

        async fn increment_streak(&self, _goal_id: &str) -> Result<()> {
            unimplemented!()
        }

        async fn add_achieved_milestones(
            &self,
            _goal_id: &str,
            _milestones: &[Milestone],
        ) -> Result<()> {
            unimplemented!()
        }

        async fn set_status(&self, _goal_id: &str, _status: GoalStatus) -> Result<()> {
            unimplemented!()
        }

        async fn update_analytics(&self, _goal_id: &str, _analytics: &GoalAnalytics) -> Result<()> {
            unimplemented!()
        }
    }

    fn test_goal() -> SavingsGoal {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        SavingsGoal {
            id: "goal-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Laptop".to_string(),
            target_amount: 2000.0,
            current_amount: 0.0,
            start_date: start,
            deadline: start + Duration::days(365),
            priority: GoalPriority::Low,
            category_id: None,
            status: GoalStatus::Active,
            auto_contribution: AutoContributionPolicy::default(),
            contribution_streak: 0,
            achieved_milestones: Vec::new(),
            analytics: None,
            created_at: start,
            updated_at: start,
        }
    }

    fn new_rule() -> NewRule {
        NewRule {
            id: None,
            goal_id: "goal-1".to_string(),
            config: RuleConfig::PercentageOfIncome { percentage: 10.0 },
            frequency: RuleFrequency::EveryIncome,
            minimum_income_threshold: None,
            maximum_contribution: None,
            enabled: true,
            description: "Save 10% of every paycheck".to_string(),
        }
    }

    fn service(
        rule_repo: Arc<MockRuleRepository>,
        goal_repo: Arc<MockGoalRepository>,
    ) -> RuleService {
        RuleService::new(rule_repo, goal_repo)
    }

    #[tokio::test]
    async fn test_create_rule() {
        let rule_repo = Arc::new(MockRuleRepository::default());
        let goal_repo = Arc::new(MockGoalRepository::with_goal(test_goal()));
        let service = service(rule_repo.clone(), goal_repo);

        let rule = service.create_rule(new_rule()).await.unwrap();
        assert_eq!(rule.goal_id, "goal-1");
        assert_eq!(rule.last_executed, None);
        assert_eq!(rule.next_scheduled, None);
    }

    #[tokio::test]
    async fn test_create_rule_rejects_invalid_config() {
        let rule_repo = Arc::new(MockRuleRepository::default());
        let goal_repo = Arc::new(MockGoalRepository::with_goal(test_goal()));
        let service = service(rule_repo.clone(), goal_repo);

        let mut bad = new_rule();
        bad.config = RuleConfig::PercentageOfIncome { percentage: 150.0 };
        let result = service.create_rule(bad).await;
        assert!(matches!(
            result,
            Err(Error::Rule(RuleError::InconsistentConfig(_)))
        ));
        assert!(rule_repo.rules.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rule_rejects_unknown_goal() {
        let service = service(
            Arc::new(MockRuleRepository::default()),
            Arc::new(MockGoalRepository::default()),
        );

        let result = service.create_rule(new_rule()).await;
        assert!(matches!(result, Err(Error::Goal(GoalError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_update_rule_rejects_blank_description() {
        let rule_repo = Arc::new(MockRuleRepository::default());
        let goal_repo = Arc::new(MockGoalRepository::with_goal(test_goal()));
        let service = service(rule_repo, goal_repo);
        let rule = service.create_rule(new_rule()).await.unwrap();

        let update = RuleUpdate {
            description: Some("".to_string()),
            ..Default::default()
        };
        let result = service.update_rule(&rule.id, update).await;
        assert!(matches!(
            result,
            Err(Error::Rule(RuleError::MissingDescription))
        ));
    }

    #[tokio::test]
    async fn test_enable_disable() {
        let rule_repo = Arc::new(MockRuleRepository::default());
        let goal_repo = Arc::new(MockGoalRepository::with_goal(test_goal()));
        let service = service(rule_repo.clone(), goal_repo);
        let rule = service.create_rule(new_rule()).await.unwrap();

        service.disable_rule(&rule.id).await.unwrap();
        assert!(!rule_repo.stored(&rule.id).enabled);

        service.enable_rule(&rule.id).await.unwrap();
        assert!(rule_repo.stored(&rule.id).enabled);
    }

    #[tokio::test]
    async fn test_get_rule_not_found() {
        let service = service(
            Arc::new(MockRuleRepository::default()),
            Arc::new(MockGoalRepository::default()),
        );
        assert!(matches!(
            service.get_rule("missing"),
            Err(Error::Rule(RuleError::NotFound(_)))
        ));
    }
}
