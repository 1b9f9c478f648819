use content_domain_macros::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Cultures")]
pub struct Culture {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// The neutral culture holds fallback text and gets no serialized objects.
    pub is_neutral: bool,
}

impl Culture {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            code: code.into(),
            name: name.into(),
            is_neutral: false,
        }
    }

    pub fn neutral() -> Self {
        Self {
            id: 0,
            code: "__".to_string(),
            name: "Neutral".to_string(),
            is_neutral: true,
        }
    }
}

/// Text of one dictionary entry in one culture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Localizations")]
pub struct Localization {
    pub id: i64,
    pub dictionary_id: i64,
    pub culture_id: i64,
    pub value: String,
}
