use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use nestegg_core::errors::Result;
use nestegg_core::rules::{
    NewRule, RuleFrequency, RuleRepositoryTrait, RuleUpdate, SavingsRule,
};

use super::model::{NewRuleDB, RuleDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{savings_goals, savings_rules};
use crate::schema::savings_rules::dsl::*;

pub struct RuleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RuleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RuleRepository { pool, writer }
    }
}

fn find_row(conn: &mut SqliteConnection, rule_id: &str) -> Result<RuleDB> {
    Ok(savings_rules
        .find(rule_id)
        .first::<RuleDB>(conn)
        .map_err(StorageError::from)?)
}

#[async_trait]
impl RuleRepositoryTrait for RuleRepository {
    fn find(&self, rule_id: &str) -> Result<Option<SavingsRule>> {
        let mut conn = get_connection(&self.pool)?;
        let row = savings_rules
            .find(rule_id)
            .first::<RuleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(RuleDB::into_domain).transpose()
    }

    fn list_by_goal(&self, gid: &str) -> Result<Vec<SavingsRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_rules
            .filter(goal_id.eq(gid))
            .order(created_at.asc())
            .load::<RuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(RuleDB::into_domain).collect()
    }

    fn due_rules(
        &self,
        rule_frequency: RuleFrequency,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<SavingsRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_rules
            .filter(frequency.eq(rule_frequency.as_str()))
            .filter(enabled.eq(true))
            .filter(
                next_scheduled
                    .is_null()
                    .or(next_scheduled.le(as_of.naive_utc())),
            )
            .load::<RuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(RuleDB::into_domain).collect()
    }

    fn income_rules_for_user(&self, uid: &str) -> Result<Vec<SavingsRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_rules::table
            .inner_join(savings_goals::table)
            .filter(savings_goals::user_id.eq(uid))
            .filter(savings_rules::enabled.eq(true))
            .filter(savings_rules::frequency.eq(RuleFrequency::EveryIncome.as_str()))
            .select(RuleDB::as_select())
            .load::<RuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(RuleDB::into_domain).collect()
    }

    async fn insert(&self, new_rule: NewRule) -> Result<SavingsRule> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsRule> {
                let now = Utc::now().naive_utc();
                let row = NewRuleDB {
                    id: new_rule.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    goal_id: new_rule.goal_id,
                    config: serde_json::to_string(&new_rule.config)
                        .map_err(StorageError::from)?,
                    frequency: new_rule.frequency.as_str().to_string(),
                    minimum_income_threshold: new_rule.minimum_income_threshold,
                    maximum_contribution: new_rule.maximum_contribution,
                    enabled: new_rule.enabled,
                    description: new_rule.description,
                    created_at: now,
                    updated_at: now,
                };

                let inserted = diesel::insert_into(savings_rules::table)
                    .values(&row)
                    .returning(RuleDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                inserted.into_domain()
            })
            .await
    }

    async fn update(&self, rule_id: &str, update: RuleUpdate) -> Result<SavingsRule> {
        let rule_id_owned = rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsRule> {
                let mut row = find_row(conn, &rule_id_owned)?;
                if let Some(new_config) = update.config {
                    row.config =
                        serde_json::to_string(&new_config).map_err(StorageError::from)?;
                }
                if let Some(new_frequency) = update.frequency {
                    row.frequency = new_frequency.as_str().to_string();
                }
                if let Some(threshold) = update.minimum_income_threshold {
                    row.minimum_income_threshold = Some(threshold);
                }
                if let Some(cap) = update.maximum_contribution {
                    row.maximum_contribution = Some(cap);
                }
                if let Some(new_description) = update.description {
                    row.description = new_description;
                }
                row.updated_at = Utc::now().naive_utc();

                diesel::update(savings_rules.find(rule_id_owned.as_str()))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.into_domain()
            })
            .await
    }

    async fn delete(&self, rule_id: &str) -> Result<usize> {
        let rule_id_owned = rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(savings_rules.find(rule_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn set_enabled(&self, rule_id: &str, is_enabled: bool) -> Result<()> {
        let rule_id_owned = rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(savings_rules.find(rule_id_owned))
                    .set((
                        enabled.eq(is_enabled),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn mark_executed(
        &self,
        rule_id: &str,
        executed_at: DateTime<Utc>,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let rule_id_owned = rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(savings_rules.find(rule_id_owned))
                    .set((
                        last_executed.eq(Some(executed_at.naive_utc())),
                        next_scheduled.eq(scheduled_for.map(|at| at.naive_utc())),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
