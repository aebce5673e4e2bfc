use crate::models::staff::StaffRecord;
use chrono::{DateTime, Utc};

/// Registration state of one LINE identity, derived from the roster on
/// every request. Precedence is `Registered > Pending > Unregistered`.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationState {
    Unregistered,
    Pending {
        record: StaffRecord,
        since: Option<DateTime<Utc>>,
    },
    Registered {
        record: StaffRecord,
    },
}

impl RegistrationState {
    /// Builds the state from the two identity lookups.
    pub fn from_lookups(bound: Option<StaffRecord>, pending: Option<StaffRecord>) -> Self {
        if let Some(record) = bound {
            return Self::Registered { record };
        }
        match pending {
            Some(record) => Self::Pending {
                since: record.pending_at,
                record,
            },
            None => Self::Unregistered,
        }
    }

    /// A pending entry armed before `cutoff` (or with no arming time) is stale.
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        match self {
            Self::Pending { since, .. } => since.is_none_or(|since| since < cutoff),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Pending { .. } => "pending",
            Self::Registered { .. } => "registered",
        }
    }
}
