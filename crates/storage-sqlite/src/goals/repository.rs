use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use nestegg_core::analytics::GoalAnalytics;
use nestegg_core::errors::Result;
use nestegg_core::goals::{
    GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal, SavingsGoal,
};
use nestegg_core::milestones::Milestone;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::savings_goals;
use crate::schema::savings_goals::dsl::*;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_row(conn: &mut SqliteConnection, goal_id: &str) -> Result<GoalDB> {
    Ok(savings_goals
        .find(goal_id)
        .first::<GoalDB>(conn)
        .map_err(StorageError::from)?)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn find(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = savings_goals
            .find(goal_id)
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(GoalDB::into_domain).transpose()
    }

    fn list_by_user(&self, uid: &str) -> Result<Vec<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_goals
            .filter(user_id.eq(uid))
            .order(created_at.desc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(GoalDB::into_domain).collect()
    }

    fn list_by_status(&self, uid: &str, goal_status: GoalStatus) -> Result<Vec<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_goals
            .filter(user_id.eq(uid))
            .filter(status.eq(goal_status.as_str()))
            .order(created_at.desc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(GoalDB::into_domain).collect()
    }

    async fn insert(&self, new_goal: NewGoal) -> Result<SavingsGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let now = Utc::now();
                let auto_contribution_json = new_goal
                    .auto_contribution
                    .map(|policy| serde_json::to_string(&policy))
                    .transpose()
                    .map_err(StorageError::from)?;
                let row = NewGoalDB {
                    id: new_goal
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: new_goal.user_id,
                    name: new_goal.name,
                    target_amount: new_goal.target_amount,
                    current_amount: 0.0,
                    start_date: new_goal.start_date.unwrap_or(now).naive_utc(),
                    deadline: new_goal.deadline.naive_utc(),
                    priority: new_goal.priority.as_str().to_string(),
                    category_id: new_goal.category_id,
                    status: GoalStatus::Active.as_str().to_string(),
                    auto_contribution: auto_contribution_json,
                    contribution_streak: 0,
                    achieved_milestones: "[]".to_string(),
                    created_at: now.naive_utc(),
                    updated_at: now.naive_utc(),
                };

                let inserted = diesel::insert_into(savings_goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                inserted.into_domain()
            })
            .await
    }

    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<SavingsGoal> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let mut row = find_row(conn, &goal_id_owned)?;
                if let Some(new_name) = update.name {
                    row.name = new_name;
                }
                if let Some(new_deadline) = update.deadline {
                    row.deadline = new_deadline.naive_utc();
                }
                if let Some(new_priority) = update.priority {
                    row.priority = new_priority.as_str().to_string();
                }
                if let Some(new_category) = update.category_id {
                    row.category_id = Some(new_category);
                }
                if let Some(policy) = update.auto_contribution {
                    row.auto_contribution = Some(
                        serde_json::to_string(&policy).map_err(StorageError::from)?,
                    );
                }
                row.updated_at = Utc::now().naive_utc();

                diesel::update(savings_goals.find(goal_id_owned.as_str()))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.into_domain()
            })
            .await
    }

    async fn delete(&self, goal_id: &str) -> Result<usize> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // contributions and rules go with the goal via ON DELETE CASCADE
                Ok(diesel::delete(savings_goals.find(goal_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn increment_current_amount(&self, goal_id: &str, delta: f64) -> Result<f64> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<f64> {
                Ok(diesel::update(savings_goals.find(goal_id_owned))
                    .set((
                        current_amount.eq(current_amount + delta),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(current_amount)
                    .get_result(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn increment_streak(&self, goal_id: &str) -> Result<()> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(savings_goals.find(goal_id_owned))
                    .set(contribution_streak.eq(contribution_streak + 1))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn add_achieved_milestones(
        &self,
        goal_id: &str,
        milestones: &[Milestone],
    ) -> Result<()> {
        let goal_id_owned = goal_id.to_string();
        let to_add = milestones.to_vec();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let stored: String = savings_goals
                    .find(goal_id_owned.as_str())
                    .select(achieved_milestones)
                    .first(conn)
                    .map_err(StorageError::from)?;
                let mut achieved: Vec<Milestone> =
                    serde_json::from_str(&stored).map_err(StorageError::from)?;
                for milestone in to_add {
                    if !achieved.contains(&milestone) {
                        achieved.push(milestone);
                    }
                }
                let serialized =
                    serde_json::to_string(&achieved).map_err(StorageError::from)?;

                diesel::update(savings_goals.find(goal_id_owned.as_str()))
                    .set((
                        achieved_milestones.eq(serialized),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn set_status(&self, goal_id: &str, goal_status: GoalStatus) -> Result<()> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(savings_goals.find(goal_id_owned))
                    .set((
                        status.eq(goal_status.as_str()),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn update_analytics(&self, goal_id: &str, analytics: &GoalAnalytics) -> Result<()> {
        let goal_id_owned = goal_id.to_string();
        let analytics = analytics.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(savings_goals.find(goal_id_owned))
                    .set((
                        sustainability_score.eq(Some(analytics.sustainability_score)),
                        risk_level.eq(Some(analytics.risk_level.as_str().to_string())),
                        projected_completion_date
                            .eq(Some(analytics.projected_completion_date.naive_utc())),
                        progress_rate.eq(Some(analytics.progress_rate)),
                        next_suggested_contribution
                            .eq(Some(analytics.next_suggested_contribution)),
                        avg_monthly_contribution.eq(analytics.avg_monthly_contribution),
                        analytics_computed_at.eq(Some(analytics.computed_at.naive_utc())),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
