//! Human-readable names: legacy plain strings or localized lists.

use serde::{Deserialize, Serialize};

/// A name field, either a bare string (pre-3.0) or a localized list (3.0+).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedName {
    Plain(String),
    Localized(Vec<LocalizedText>),
}

/// One localized text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
}

impl LocalizedName {
    /// The first available text, regardless of representation.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text.as_str()),
            Self::Localized(entries) => entries.first().map(|e| e.text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_string() {
        let name: LocalizedName = serde_json::from_str("\"Capital Bikes\"").unwrap();
        assert_eq!(name.first_text(), Some("Capital Bikes"));
    }

    #[test]
    fn decodes_localized_list() {
        let name: LocalizedName =
            serde_json::from_str(r#"[{"text":"Capital Bikes","language":"en"}]"#).unwrap();
        assert_eq!(name.first_text(), Some("Capital Bikes"));
    }
}
