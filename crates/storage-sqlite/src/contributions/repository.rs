use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use nestegg_core::contributions::{Contribution, ContributionRepositoryTrait, NewContribution};
use nestegg_core::errors::Result;

use super::model::{ContributionDB, NewContributionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::contributions;
use crate::schema::contributions::dsl::*;

pub struct ContributionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ContributionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ContributionRepository { pool, writer }
    }
}

#[async_trait]
impl ContributionRepositoryTrait for ContributionRepository {
    async fn insert(&self, new_contribution: NewContribution) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let now = Utc::now();
                let row = NewContributionDB {
                    id: new_contribution
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    goal_id: new_contribution.goal_id,
                    user_id: new_contribution.user_id,
                    amount: new_contribution.amount,
                    timestamp: new_contribution.timestamp.unwrap_or(now).naive_utc(),
                    source: new_contribution.source.as_str().to_string(),
                    transaction_id: new_contribution.transaction_id,
                    created_at: now.naive_utc(),
                };

                let inserted = diesel::insert_into(contributions::table)
                    .values(&row)
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                inserted.into_domain()
            })
            .await
    }

    fn list_by_goal(&self, gid: &str) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contributions
            .filter(goal_id.eq(gid))
            .order(timestamp.desc())
            .load::<ContributionDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(ContributionDB::into_domain).collect()
    }

    fn total_by_goal(&self, gid: &str) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = contributions
            .filter(goal_id.eq(gid))
            .select(diesel::dsl::sum(amount))
            .first(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total.unwrap_or(0.0))
    }
}
