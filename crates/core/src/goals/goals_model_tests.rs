#[cfg(test)]
mod tests {
    use crate::goals::goals_model::*;
    use crate::milestones::Milestone;
    use chrono::{Duration, TimeZone, Utc};

    fn sample_goal(target: f64, current: f64, window_days: i64) -> SavingsGoal {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        SavingsGoal {
            id: "goal-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: target,
            current_amount: current,
            start_date: start,
            deadline: start + Duration::days(window_days),
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

    #[test]
    fn test_progress_halfway_behind_pace() {
        // target=1000, current=400, day 50 of a 100-day window
        let goal = sample_goal(1000.0, 400.0, 100);
        let as_of = goal.start_date + Duration::days(50);

        let progress = goal.progress_at(as_of);
        assert!((progress.time_progress - 0.5).abs() < 1e-9);
        assert!((progress.amount_progress - 0.4).abs() < 1e-9);
        assert!(!progress.is_on_track);
        assert!((progress.remaining_amount - 600.0).abs() < 1e-9);
        assert_eq!(progress.days_remaining, 50);
    }

    #[test]
    fn test_progress_clamps_outside_window() {
        let goal = sample_goal(1000.0, 1500.0, 100);

        let before = goal.progress_at(goal.start_date - Duration::days(10));
        assert_eq!(before.time_progress, 0.0);
        assert_eq!(before.amount_progress, 1.0);
        assert!(before.is_on_track);

        let after = goal.progress_at(goal.deadline + Duration::days(10));
        assert_eq!(after.time_progress, 1.0);
        assert_eq!(after.days_remaining, 0);
    }

    #[test]
    fn test_progress_on_track_at_equal_fractions() {
        let goal = sample_goal(1000.0, 500.0, 100);
        let progress = goal.progress_at(goal.start_date + Duration::days(50));
        assert!(progress.is_on_track);
    }

    #[test]
    fn test_is_funded() {
        assert!(!sample_goal(1000.0, 999.99, 100).is_funded());
        assert!(sample_goal(1000.0, 1000.0, 100).is_funded());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [GoalStatus::Active, GoalStatus::Completed, GoalStatus::Paused] {
            assert_eq!(status.as_str().parse::<GoalStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(GoalPriority::High < GoalPriority::Medium);
        assert!(GoalPriority::Medium < GoalPriority::Low);
        assert_eq!("HIGH".parse::<GoalPriority>().unwrap(), GoalPriority::High);
    }

    #[test]
    fn test_goal_serialization_is_camel_case() {
        let mut goal = sample_goal(1000.0, 250.0, 100);
        goal.achieved_milestones.push(Milestone::Quarter);

        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains("targetAmount"));
        assert!(json.contains("currentAmount"));
        assert!(json.contains("achievedMilestones"));
        assert!(json.contains("25%"));

        let back: SavingsGoal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, goal);
    }

    #[test]
    fn test_auto_contribution_mode_tagged() {
        let policy = AutoContributionPolicy {
            enabled: true,
            mode: Some(AutoContributionMode::PercentageOfIncome { percentage: 10.0 }),
        };
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("percentage_of_income"));

        let back: AutoContributionPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
