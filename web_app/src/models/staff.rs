use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff member's roster entry.
///
/// Records are imported from the hospital roster; the registration flow only
/// ever touches `bound_identity`, `pending_identity` and `pending_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: i64,
    pub access_code: String,
    pub display_name: String,
    pub department: String,
    /// LINE user id confirmed for this record
    pub bound_identity: Option<String>,
    /// LINE user id waiting for "confirm"
    pub pending_identity: Option<String>,
    pub pending_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffRecord {
    /// Name shown to the user, `-` when the roster left it blank
    pub fn display_name_or_dash(&self) -> &str {
        non_blank_or_dash(&self.display_name)
    }

    /// Department shown to the user, `-` when the roster left it blank
    pub fn department_or_dash(&self) -> &str {
        non_blank_or_dash(&self.department)
    }

    pub fn is_bound(&self) -> bool {
        self.bound_identity.is_some()
    }
}

fn non_blank_or_dash(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        return "-";
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_render_as_dash() {
        let record = StaffRecord {
            id: 1,
            access_code: "D123".into(),
            display_name: "  ".into(),
            department: "Cardiology".into(),
            bound_identity: None,
            pending_identity: None,
            pending_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(record.display_name_or_dash(), "-");
        assert_eq!(record.department_or_dash(), "Cardiology");
        assert!(!record.is_bound());
    }
}
