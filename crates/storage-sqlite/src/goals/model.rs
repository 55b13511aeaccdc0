//! Database models for savings goals.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::analytics::GoalAnalytics;
use nestegg_core::errors::{DatabaseError, Error, Result};
use nestegg_core::goals::{AutoContributionPolicy, SavingsGoal};
use nestegg_core::milestones::Milestone;

use crate::errors::StorageError;

pub(crate) fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

pub(crate) fn parse_err(e: String) -> Error {
    Error::Database(DatabaseError::Internal(e))
}

/// Database model for savings goals.
///
/// Enum-valued fields are stored as their string tags; the auto-contribution
/// policy and the achieved-milestone set are stored as JSON text.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::savings_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDateTime,
    pub deadline: NaiveDateTime,
    pub priority: String,
    pub category_id: Option<String>,
    pub status: String,
    pub auto_contribution: Option<String>,
    pub contribution_streak: i32,
    pub achieved_milestones: String,
    pub sustainability_score: Option<i32>,
    pub risk_level: Option<String>,
    pub projected_completion_date: Option<NaiveDateTime>,
    pub progress_rate: Option<f64>,
    pub next_suggested_contribution: Option<f64>,
    pub avg_monthly_contribution: Option<f64>,
    pub analytics_computed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    pub fn into_domain(self) -> Result<SavingsGoal> {
        let auto_contribution: AutoContributionPolicy = match self.auto_contribution.as_deref() {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| Error::from(StorageError::from(e)))?,
            None => AutoContributionPolicy::default(),
        };
        let achieved_milestones: Vec<Milestone> =
            serde_json::from_str(&self.achieved_milestones)
                .map_err(|e| Error::from(StorageError::from(e)))?;

        let analytics = match (
            self.sustainability_score,
            self.risk_level.as_deref(),
            self.projected_completion_date,
            self.progress_rate,
            self.next_suggested_contribution,
            self.analytics_computed_at,
        ) {
            (
                Some(sustainability_score),
                Some(risk_level),
                Some(projected_completion_date),
                Some(progress_rate),
                Some(next_suggested_contribution),
                Some(computed_at),
            ) => Some(GoalAnalytics {
                sustainability_score,
                risk_level: risk_level.parse().map_err(parse_err)?,
                projected_completion_date: to_utc(projected_completion_date),
                progress_rate,
                next_suggested_contribution,
                avg_monthly_contribution: self.avg_monthly_contribution,
                computed_at: to_utc(computed_at),
            }),
            _ => None,
        };

        Ok(SavingsGoal {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            start_date: to_utc(self.start_date),
            deadline: to_utc(self.deadline),
            priority: self.priority.parse().map_err(parse_err)?,
            category_id: self.category_id,
            status: self.status.parse().map_err(parse_err)?,
            auto_contribution,
            contribution_streak: self.contribution_streak,
            achieved_milestones,
            analytics,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        })
    }
}

/// Database model for creating a new goal. Analytics columns start NULL and
/// are only populated by the analyzer's write-back.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDateTime,
    pub deadline: NaiveDateTime,
    pub priority: String,
    pub category_id: Option<String>,
    pub status: String,
    pub auto_contribution: Option<String>,
    pub contribution_streak: i32,
    pub achieved_milestones: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
