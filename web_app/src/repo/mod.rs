//! Roster persistence.
//!
//! Every mutating method is a single conditional statement (match-then-set),
//! so two webhook requests racing on the same record or identity cannot lose
//! an update. The returned `bool`/`u64` tells whether the match held.

pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepo: Send + Sync {
    /// Case-insensitive lookup by access code
    async fn get_staff_by_access_code(
        &self,
        access_code: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>>;

    async fn get_staff_by_bound_identity(
        &self,
        identity: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>>;

    async fn get_staff_by_pending_identity(
        &self,
        identity: &str,
    ) -> anyhow::Result<Option<models::staff::StaffRecord>>;

    /// Arms `identity` as pending on `staff_id`, only while the record is unbound.
    async fn set_pending_identity(
        &self,
        staff_id: i64,
        identity: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// Moves `identity` from pending to bound on `staff_id`.
    ///
    /// Matches only while the record still holds `pending_identity == identity`,
    /// is unbound, and no other record is bound to `identity`.
    async fn confirm_pending_identity(&self, staff_id: i64, identity: &str)
    -> anyhow::Result<bool>;

    /// Clears pending state on every record holding `identity`.
    async fn clear_pending_identity(&self, identity: &str) -> anyhow::Result<u64>;

    /// Clears pending state for `identity` on every record except `keep_id`.
    async fn clear_other_pending_identity(
        &self,
        identity: &str,
        keep_id: i64,
    ) -> anyhow::Result<u64>;

    /// Clears pending state for `identity` armed before `cutoff`.
    async fn clear_expired_pending_identity(
        &self,
        identity: &str,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<u64>;
}

pub type ImplRosterRepo = Box<dyn RosterRepo>;
