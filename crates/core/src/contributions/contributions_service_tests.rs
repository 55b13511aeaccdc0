#[cfg(test)]
mod tests {
    use crate::analytics::GoalAnalytics;
    use crate::contributions::contributions_model::*;
    use crate::contributions::{
        ContributionRepositoryTrait, ContributionService, ContributionServiceTrait,
    };
    use crate::errors::{Error, Result};
    use crate::events::{DomainEvent, MockDomainEventSink};
    use crate::goals::{
        AutoContributionPolicy, GoalError, GoalPriority, GoalRepositoryTrait, GoalStatus,
        GoalUpdate, NewGoal, SavingsGoal,
    };
    use crate::milestones::{Milestone, MilestoneTracker};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    // --- Mock ContributionRepository ---
    #[derive(Clone, Default)]
    struct MockContributionRepository {
        contributions: Arc<Mutex<Vec<Contribution>>>,
    }

    #[async_trait]
    impl ContributionRepositoryTrait for MockContributionRepository {
        async fn insert(&self, new_contribution: NewContribution) -> Result<Contribution> {
            let mut contributions = self.contributions.lock().unwrap();
            let contribution = Contribution {
                id: new_contribution
                    .id
                    .unwrap_or_else(|| format!("contrib-{}", contributions.len() + 1)),
                goal_id: new_contribution.goal_id,
                user_id: new_contribution.user_id,
                amount: new_contribution.amount,
                timestamp: new_contribution.timestamp.unwrap_or_else(Utc::now),
                source: new_contribution.source,
                transaction_id: new_contribution.transaction_id,
            };
            contributions.push(contribution.clone());
            Ok(contribution)
        }

        fn list_by_goal(&self, goal_id: &str) -> Result<Vec<Contribution>> {
            let mut result: Vec<Contribution> = self
                .contributions
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.goal_id == goal_id)
                .cloned()
                .collect();
            result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(result)
        }

        fn total_by_goal(&self, goal_id: &str) -> Result<f64> {
            Ok(self
                .contributions
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.goal_id == goal_id)
                .map(|c| c.amount)
                .sum())
        }
    }

    // --- Mock GoalRepository ---
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

        fn stored(&self, goal_id: &str) -> SavingsGoal {
            self.goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id)
                .cloned()
                .unwrap()
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

        async fn increment_current_amount(&self, goal_id: &str, delta: f64) -> Result<f64> {
            let mut goals = self.goals.lock().unwrap();
            let goal = goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| Error::from(GoalError::NotFound(goal_id.to_string())))?;
            goal.current_amount += delta;
            Ok(goal.current_amount)
        }

        async fn increment_streak(&self, goal_id: &str) -> Result<()> {
            let mut goals = self.goals.lock().unwrap();
            if let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) {
                goal.contribution_streak += 1;
            }
            Ok(())
        }

        async fn add_achieved_milestones(
            &self,
            goal_id: &str,
            milestones: &[Milestone],
        ) -> Result<()> {
            let mut goals = self.goals.lock().unwrap();
            if let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) {
                for milestone in milestones {
                    if !goal.achieved_milestones.contains(milestone) {
                        goal.achieved_milestones.push(*milestone);
                    }
                }
            }
            Ok(())
        }

        async fn set_status(&self, goal_id: &str, status: GoalStatus) -> Result<()> {
            let mut goals = self.goals.lock().unwrap();
            if let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) {
                goal.status = status;
            }
            Ok(())
        }

        async fn update_analytics(&self, _goal_id: &str, _analytics: &GoalAnalytics) -> Result<()> {
            unimplemented!()
        }
    }

    fn test_goal(current: f64) -> SavingsGoal {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        SavingsGoal {
            id: "goal-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Bike".to_string(),
            target_amount: 1000.0,
            current_amount: current,
            start_date: start,
            deadline: start + Duration::days(365),
            priority: GoalPriority::Medium,
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

    struct Fixture {
        service: Arc<ContributionService>,
        contribution_repo: Arc<MockContributionRepository>,
        goal_repo: Arc<MockGoalRepository>,
        sink: Arc<MockDomainEventSink>,
    }

    fn fixture(goal: SavingsGoal) -> Fixture {
        let contribution_repo = Arc::new(MockContributionRepository::default());
        let goal_repo = Arc::new(MockGoalRepository::with_goal(goal));
        let sink = Arc::new(MockDomainEventSink::new());
        let tracker = Arc::new(MilestoneTracker::new(goal_repo.clone(), sink.clone()));
        let service = Arc::new(ContributionService::new(
            contribution_repo.clone(),
            goal_repo.clone(),
            tracker,
            sink.clone(),
        ));
        Fixture {
            service,
            contribution_repo,
            goal_repo,
            sink,
        }
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let f = fixture(test_goal(0.0));

        for amount in [0.0, -10.0] {
            let result = f
                .service
                .add_contribution("goal-1", "user-1", amount, ContributionSource::Manual, None)
                .await;
            assert!(matches!(
                result,
                Err(Error::Goal(GoalError::InvalidAmount(_)))
            ));
        }
        // no state change
        assert!(f.contribution_repo.contributions.lock().unwrap().is_empty());
        assert_eq!(f.goal_repo.stored("goal-1").current_amount, 0.0);
    }

    #[tokio::test]
    async fn test_rejects_unknown_goal() {
        let f = fixture(test_goal(0.0));

        let result = f
            .service
            .add_contribution("missing", "user-1", 50.0, ContributionSource::Manual, None)
            .await;
        assert!(matches!(result, Err(Error::Goal(GoalError::NotFound(_)))));
        assert!(f.contribution_repo.contributions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_contribution_updates_cached_total() {
        let f = fixture(test_goal(0.0));

        let contribution = f
            .service
            .add_contribution(
                "goal-1",
                "user-1",
                75.0,
                ContributionSource::Manual,
                Some("txn-9".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(contribution.goal_id, "goal-1");
        assert_eq!(contribution.transaction_id.as_deref(), Some("txn-9"));
        assert_eq!(f.goal_repo.stored("goal-1").current_amount, 75.0);
        assert!(matches!(
            f.sink.events().first().unwrap(),
            DomainEvent::ContributionRecorded { .. }
        ));
    }

    #[tokio::test]
    async fn test_cached_total_matches_ledger_sum() {
        let f = fixture(test_goal(0.0));

        for amount in [10.0, 20.5, 31.25] {
            f.service
                .add_contribution("goal-1", "user-1", amount, ContributionSource::Manual, None)
                .await
                .unwrap();

            // invariant holds after every mutation
            let cached = f.goal_repo.stored("goal-1").current_amount;
            let total = f.service.total_contributions("goal-1").unwrap();
            assert!((cached - total).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_milestones_rechecked_after_contribution() {
        let f = fixture(test_goal(240.0));

        f.service
            .add_contribution("goal-1", "user-1", 20.0, ContributionSource::Auto, None)
            .await
            .unwrap();
        assert_eq!(
            f.goal_repo.stored("goal-1").achieved_milestones,
            vec![Milestone::Quarter]
        );

        f.service
            .add_contribution("goal-1", "user-1", 740.0, ContributionSource::Manual, None)
            .await
            .unwrap();
        let goal = f.goal_repo.stored("goal-1");
        assert_eq!(goal.achieved_milestones, Milestone::ALL.to_vec());
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[tokio::test]
    async fn test_contributions_listed_newest_first() {
        let f = fixture(test_goal(0.0));

        let early = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        for (i, offset) in [2i64, 0, 1].iter().enumerate() {
            f.contribution_repo
                .insert(NewContribution {
                    id: Some(format!("c{}", i)),
                    goal_id: "goal-1".to_string(),
                    user_id: "user-1".to_string(),
                    amount: 10.0,
                    timestamp: Some(early + Duration::days(*offset)),
                    source: ContributionSource::Manual,
                    transaction_id: None,
                })
                .await
                .unwrap();
        }

        let listed = f.service.contributions_for_goal("goal-1").unwrap();
        let ids: Vec<&str> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c2", "c1"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_contributions_to_same_goal() {
        let f = fixture(test_goal(0.0));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let service = f.service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .add_contribution("goal-1", "user-1", 10.0, ContributionSource::Auto, None)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let goal = f.goal_repo.stored("goal-1");
        assert_eq!(goal.current_amount, 100.0);
        assert_eq!(f.service.total_contributions("goal-1").unwrap(), 100.0);
    }
}
