//! Database models for savings rules.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::errors::Result;
use nestegg_core::rules::SavingsRule;

use crate::errors::StorageError;
use crate::goals::model::{parse_err, to_utc};

/// Database model for savings rules.
///
/// The type-specific parameters live in `config` as the JSON encoding of
/// the core `RuleConfig` variant, so a row can never carry a half-configured
/// rule.
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
#[diesel(table_name = crate::schema::savings_rules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RuleDB {
    pub id: String,
    pub goal_id: String,
    pub config: String,
    pub frequency: String,
    pub minimum_income_threshold: Option<f64>,
    pub maximum_contribution: Option<f64>,
    pub enabled: bool,
    pub description: String,
    pub last_executed: Option<NaiveDateTime>,
    pub next_scheduled: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RuleDB {
    pub fn into_domain(self) -> Result<SavingsRule> {
        Ok(SavingsRule {
            id: self.id,
            goal_id: self.goal_id,
            config: serde_json::from_str(&self.config).map_err(StorageError::from)?,
            frequency: self.frequency.parse().map_err(parse_err)?,
            minimum_income_threshold: self.minimum_income_threshold,
            maximum_contribution: self.maximum_contribution,
            enabled: self.enabled,
            description: self.description,
            last_executed: self.last_executed.map(to_utc),
            next_scheduled: self.next_scheduled.map(to_utc),
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        })
    }
}

/// Database model for creating a rule. Schedule stamps start NULL: a fresh
/// time-based rule is immediately due.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_rules)]
#[serde(rename_all = "camelCase")]
pub struct NewRuleDB {
    pub id: String,
    pub goal_id: String,
    pub config: String,
    pub frequency: String,
    pub minimum_income_threshold: Option<f64>,
    pub maximum_contribution: Option<f64>,
    pub enabled: bool,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
