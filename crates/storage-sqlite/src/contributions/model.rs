//! Database models for contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::contributions::Contribution;
use nestegg_core::errors::Result;

use crate::goals::model::{parse_err, to_utc};

/// Database model for ledger entries. Rows are insert-only; there is no
/// changeset type.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContributionDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    pub source: String,
    pub transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl ContributionDB {
    pub fn into_domain(self) -> Result<Contribution> {
        Ok(Contribution {
            id: self.id,
            goal_id: self.goal_id,
            user_id: self.user_id,
            amount: self.amount,
            timestamp: to_utc(self.timestamp),
            source: self.source.parse().map_err(parse_err)?,
            transaction_id: self.transaction_id,
        })
    }
}

/// Database model for appending a contribution.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::contributions)]
#[serde(rename_all = "camelCase")]
pub struct NewContributionDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    pub source: String,
    pub transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
}
