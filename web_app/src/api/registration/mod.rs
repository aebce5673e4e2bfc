//! # Registration Module
//!
//! Lets a doctor bind their LINE account to a roster record by typing the
//! record's access code and then "confirm".
//!
//! State is never stored as such: [`RegistrationState`] is rebuilt from the
//! roster on each message, and every transition is one conditional update in
//! [`RosterRepo`](crate::repo::RosterRepo).
//!
//! | state               | input       | effect                          | reply              |
//! |---------------------|-------------|---------------------------------|--------------------|
//! | any                 | cancel      | clear pending for the identity  | `Cancelled`        |
//! | Registered          | other       | none                            | `AlreadyBound`     |
//! | Pending             | confirm     | pending becomes bound           | `Registered`       |
//! | Unregistered        | confirm     | none                            | `NothingToConfirm` |
//! | Unregistered/Pending| known code  | arm pending on the record       | `ConfirmPrompt`    |
//! | Unregistered/Pending| unknown code| none                            | `CodeNotFound`     |

pub mod command;
pub mod reply;
pub mod state;

pub use command::{Command, normalize};
pub use reply::Reply;
pub use state::RegistrationState;

use crate::{metric, models::staff::StaffRecord, repo};
use chrono::Utc;

/// Registration state machine bound to a roster
pub struct RegistrationMachine {
    roster: repo::ImplRosterRepo,
    /// `None` keeps pending registrations forever
    pending_ttl: Option<chrono::Duration>,
}

impl RegistrationMachine {
    pub fn new(roster: repo::ImplRosterRepo, pending_ttl: Option<chrono::Duration>) -> Self {
        Self {
            roster,
            pending_ttl,
        }
    }

    /// Derives the current state of `identity`, expiring a stale pending entry.
    ///
    /// An expired entry is cleared with a conditional update so a fresh
    /// re-arm racing with this request is left untouched.
    pub async fn current_state(&self, identity: &str) -> anyhow::Result<RegistrationState> {
        let bound = self.roster.get_staff_by_bound_identity(identity).await?;
        let pending = match bound {
            Some(_) => None,
            None => self.roster.get_staff_by_pending_identity(identity).await?,
        };

        let state = RegistrationState::from_lookups(bound, pending);

        let Some(ttl) = self.pending_ttl else {
            return Ok(state);
        };
        // a window reaching before the earliest representable time never expires
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return Ok(state);
        };
        if !state.is_expired(cutoff) {
            return Ok(state);
        }

        let cleared = self
            .roster
            .clear_expired_pending_identity(identity, cutoff)
            .await?;
        logfire::info!(
            "Expired pending registration cleared: {cleared}",
            cleared = cleared as i64
        );
        metric::incr_registration_statds("pending_expired");

        Ok(RegistrationState::Unregistered)
    }

    /// Handles one normalized text message from `identity` and decides the reply.
    ///
    /// # Arguments
    /// * `identity` - LINE user id of the sender
    /// * `text` - Message text, already passed through [`normalize`]
    ///
    /// # Returns
    /// * `anyhow::Result<Reply>` - The single reply for this message
    ///
    /// # Errors
    /// Returns an error when the roster cannot be read or updated; no reply
    /// should be sent in that case.
    #[tracing::instrument(skip_all)]
    pub async fn handle(&self, identity: &str, text: &str) -> anyhow::Result<Reply> {
        let command = Command::parse(text);
        let state = self.current_state(identity).await?;
        let state_name = state.name();

        let reply = match (state, command) {
            (_, Command::Cancel) => self.cancel(identity).await?,
            (RegistrationState::Registered { record }, _) => Reply::AlreadyBound { record },
            (RegistrationState::Pending { record, .. }, Command::Confirm) => {
                self.confirm(identity, record).await?
            }
            (RegistrationState::Unregistered, Command::Confirm) => Reply::NothingToConfirm,
            (RegistrationState::Pending { record, .. }, Command::AccessCode(code)) => {
                self.arm(identity, &code, Some(&record)).await?
            }
            (RegistrationState::Unregistered, Command::AccessCode(code)) => {
                self.arm(identity, &code, None).await?
            }
        };

        let reply_kind = reply.kind();
        let staff_id: Option<i64> = reply.record().map(|record| record.id);
        logfire::info!(
            "Registration message handled: {state} -> {reply}",
            state = state_name,
            reply = reply_kind,
            staff_id = staff_id
        );
        metric::incr_registration_statds(reply.kind());

        Ok(reply)
    }

    /// Drops any pending registration of `identity`. A confirmed binding is kept.
    async fn cancel(&self, identity: &str) -> anyhow::Result<Reply> {
        self.roster.clear_pending_identity(identity).await?;
        Ok(Reply::Cancelled)
    }

    async fn confirm(&self, identity: &str, record: StaffRecord) -> anyhow::Result<Reply> {
        if !self
            .roster
            .confirm_pending_identity(record.id, identity)
            .await?
        {
            // another request confirmed, cancelled or re-armed this record first
            return Ok(Reply::NothingToConfirm);
        }

        Ok(Reply::Registered {
            record: StaffRecord {
                bound_identity: Some(identity.to_string()),
                pending_identity: None,
                pending_at: None,
                ..record
            },
        })
    }

    /// Looks up `code` and arms `identity` as pending on the matched record.
    ///
    /// `previous` is the record the identity is currently pending on, if any.
    /// Switching to a different record clears the old pending entry only once
    /// the new one is armed, so a failed arm leaves the old entry in place.
    async fn arm(
        &self,
        identity: &str,
        code: &str,
        previous: Option<&StaffRecord>,
    ) -> anyhow::Result<Reply> {
        let Some(record) = self.roster.get_staff_by_access_code(code).await? else {
            return Ok(Reply::CodeNotFound);
        };

        if record.is_bound() {
            return Ok(Reply::CodeTaken);
        }

        let now = Utc::now();
        if !self
            .roster
            .set_pending_identity(record.id, identity, now)
            .await?
        {
            // bound by someone else between lookup and update
            return Ok(Reply::CodeTaken);
        }

        if previous.is_some_and(|previous| previous.id != record.id) {
            self.roster
                .clear_other_pending_identity(identity, record.id)
                .await?;
        }

        Ok(Reply::ConfirmPrompt {
            record: StaffRecord {
                pending_identity: Some(identity.to_string()),
                pending_at: Some(now),
                ..record
            },
        })
    }
}
