//! Replies sent back to the user, one per inbound text message.

use crate::models::staff::StaffRecord;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Pending state (if any) was dropped
    Cancelled,
    /// The identity is already bound; nothing was changed
    AlreadyBound { record: StaffRecord },
    /// The access code matched and awaits "confirm"
    ConfirmPrompt { record: StaffRecord },
    CodeNotFound,
    /// The access code belongs to a record bound to another identity
    CodeTaken,
    /// Registration completed
    Registered { record: StaffRecord },
    NothingToConfirm,
}

impl Reply {
    /// Stable label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Cancelled => "cancelled",
            Reply::AlreadyBound { .. } => "already_bound",
            Reply::ConfirmPrompt { .. } => "confirm_prompt",
            Reply::CodeNotFound => "code_not_found",
            Reply::CodeTaken => "code_taken",
            Reply::Registered { .. } => "registered",
            Reply::NothingToConfirm => "nothing_to_confirm",
        }
    }

    /// Roster record the reply talks about, if any
    pub fn record(&self) -> Option<&StaffRecord> {
        match self {
            Reply::AlreadyBound { record }
            | Reply::ConfirmPrompt { record }
            | Reply::Registered { record } => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Cancelled => write!(
                f,
                "🚫 ยกเลิกการลงทะเบียนแล้ว\n\nพิมพ์ care_provider_code เพื่อเริ่มใหม่"
            ),
            Reply::AlreadyBound { record } => write!(
                f,
                "⚠️ บัญชี LINE นี้ลงทะเบียนแล้ว\n\nชื่อ: {name}\nแผนก: {department}",
                name = record.display_name_or_dash(),
                department = record.department_or_dash(),
            ),
            Reply::ConfirmPrompt { record } => write!(
                f,
                "🔎 พบข้อมูลแพทย์\n\nชื่อ: {name}\nแผนก: {department}\n\n\
                 พิมพ์ \"confirm\" เพื่อยืนยัน\nหรือ \"cancel\" เพื่อยกเลิก",
                name = record.display_name_or_dash(),
                department = record.department_or_dash(),
            ),
            Reply::CodeNotFound => write!(
                f,
                "❌ ไม่พบรหัสแพทย์ในระบบ\n\nกรุณาตรวจสอบ care_provider_code\nหรือ ติดต่อ Admin"
            ),
            Reply::CodeTaken => write!(
                f,
                "⛔ รหัสแพทย์นี้ลงทะเบียนกับบัญชี LINE อื่นแล้ว\n\nกรุณาติดต่อ Admin"
            ),
            Reply::Registered { record } => write!(
                f,
                "✅ ลงทะเบียน LINE สำเร็จ\n\nชื่อ: {name}\nแผนก: {department}",
                name = record.display_name_or_dash(),
                department = record.department_or_dash(),
            ),
            Reply::NothingToConfirm => write!(
                f,
                "⚠️ ไม่มีรายการที่รอการยืนยัน\n\nกรุณาพิมพ์ care_provider_code ก่อน"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn somchai() -> StaffRecord {
        StaffRecord {
            id: 7,
            access_code: "D123".into(),
            display_name: "Somchai".into(),
            department: "Cardiology".into(),
            bound_identity: None,
            pending_identity: None,
            pending_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_replies_show_name_and_department() {
        for reply in [
            Reply::AlreadyBound { record: somchai() },
            Reply::ConfirmPrompt { record: somchai() },
            Reply::Registered { record: somchai() },
        ] {
            let text = reply.to_string();
            assert!(text.contains("ชื่อ: Somchai"), "{text}");
            assert!(text.contains("แผนก: Cardiology"), "{text}");
        }
    }

    #[test]
    fn test_confirm_prompt_names_control_words() {
        let text = Reply::ConfirmPrompt { record: somchai() }.to_string();

        assert!(text.contains("\"confirm\""));
        assert!(text.contains("\"cancel\""));
    }

    #[test]
    fn test_record_is_exposed_for_record_replies_only() {
        assert_eq!(
            Reply::Registered { record: somchai() }.record().map(|r| r.id),
            Some(7)
        );
        assert!(Reply::CodeTaken.record().is_none());
        assert!(Reply::Cancelled.record().is_none());
    }

    #[test]
    fn test_kind_is_unique_per_variant() {
        let kinds = [
            Reply::Cancelled.kind(),
            Reply::AlreadyBound { record: somchai() }.kind(),
            Reply::ConfirmPrompt { record: somchai() }.kind(),
            Reply::CodeNotFound.kind(),
            Reply::CodeTaken.kind(),
            Reply::Registered { record: somchai() }.kind(),
            Reply::NothingToConfirm.kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();

        assert_eq!(unique.len(), kinds.len());
    }
}
