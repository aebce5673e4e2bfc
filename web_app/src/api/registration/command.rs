//! Parsing of user text into registration commands.

const CANCEL_WORDS: [&str; 2] = ["cancel", "ยกเลิก"];
const CONFIRM_WORDS: [&str; 2] = ["confirm", "ยืนยัน"];

/// What the user asked for with a single text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cancel,
    Confirm,
    /// Anything that is not a control word is tried as an access code
    AccessCode(String),
}

impl Command {
    /// Parses an already [normalized](normalize) message.
    pub fn parse(text: &str) -> Self {
        if CANCEL_WORDS.contains(&text) {
            return Self::Cancel;
        }
        if CONFIRM_WORDS.contains(&text) {
            return Self::Confirm;
        }
        Self::AccessCode(text.to_string())
    }
}

/// Trims and case-folds user text. Returns `None` when nothing is left.
pub fn normalize(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  D123\n"), Some("d123".to_string()));
        assert_eq!(normalize("CONFIRM"), Some("confirm".to_string()));
        assert_eq!(normalize(" \t "), None);
    }

    #[test]
    fn test_parse_control_words() {
        assert_eq!(Command::parse("cancel"), Command::Cancel);
        assert_eq!(Command::parse("ยกเลิก"), Command::Cancel);
        assert_eq!(Command::parse("confirm"), Command::Confirm);
        assert_eq!(Command::parse("ยืนยัน"), Command::Confirm);
    }

    #[test]
    fn test_parse_anything_else_is_access_code() {
        assert_eq!(
            Command::parse("d123"),
            Command::AccessCode("d123".to_string())
        );
        assert_eq!(
            Command::parse("confirm please"),
            Command::AccessCode("confirm please".to_string())
        );
    }
}
