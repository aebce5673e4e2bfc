use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{RosterRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::staff::StaffRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let pending_at: Option<i64> = row.try_get("pending_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            access_code: row.try_get("access_code")?,
            display_name: row.try_get("display_name")?,
            department: row.try_get("department")?,
            bound_identity: row.try_get("bound_identity")?,
            pending_identity: row.try_get("pending_identity")?,
            pending_at: pending_at.and_then(DateTime::from_timestamp_millis),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl SqlxSqliteRepo {
    async fn fetch_one_staff(
        &self,
        query: &str,
        value: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>> {
        Ok(sqlx::query_as::<_, models::staff::StaffRecord>(query)
            .bind(value)
            .fetch_optional(&self.db_pool)
            .await?)
    }
}

#[async_trait]
impl RosterRepo for SqlxSqliteRepo {
    async fn get_staff_by_access_code(
        &self,
        access_code: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>> {
        self.fetch_one_staff(sqlite_queries::QUERY_GET_STAFF_BY_ACCESS_CODE, access_code)
            .await
    }

    async fn get_staff_by_bound_identity(
        &self,
        identity: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>> {
        self.fetch_one_staff(sqlite_queries::QUERY_GET_STAFF_BY_BOUND_IDENTITY, identity)
            .await
    }

    async fn get_staff_by_pending_identity(
        &self,
        identity: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>> {
        self.fetch_one_staff(sqlite_queries::QUERY_GET_STAFF_BY_PENDING_IDENTITY, identity)
            .await
    }

    async fn set_pending_identity(
        &self,
        staff_id: i64,
        identity: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        Ok(sqlx::query(sqlite_queries::QUERY_SET_PENDING_IDENTITY)
            .bind(staff_id)
            .bind(identity)
            .bind(at.timestamp_millis())
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected()
            == 1)
    }

    async fn confirm_pending_identity(
        &self,
        staff_id: i64,
        identity: &str,
    ) -> anyhow::Result<bool> {
        Ok(sqlx::query(sqlite_queries::QUERY_CONFIRM_PENDING_IDENTITY)
            .bind(staff_id)
            .bind(identity)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected()
            == 1)
    }

    async fn clear_pending_identity(&self, identity: &str) -> anyhow::Result<u64> {
        Ok(sqlx::query(sqlite_queries::QUERY_CLEAR_PENDING_IDENTITY)
            .bind(identity)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }

    async fn clear_other_pending_identity(
        &self,
        identity: &str,
        keep_id: i64,
    ) -> anyhow::Result<u64> {
        Ok(sqlx::query(sqlite_queries::QUERY_CLEAR_OTHER_PENDING_IDENTITY)
            .bind(identity)
            .bind(keep_id)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }

    async fn clear_expired_pending_identity(
        &self,
        identity: &str,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        Ok(sqlx::query(sqlite_queries::QUERY_CLEAR_EXPIRED_PENDING_IDENTITY)
            .bind(identity)
            .bind(cutoff.timestamp_millis())
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }
}
