//! Configuration for the content domain.
//!
//! ```ignore
//! let config = DomainConfig::from_json_str(r#"{ "neutral_culture_id": 1, "default_take": 20 }"#)?;
//! let storage = SqliteStorage::open(&config)?;
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{DomainError, Result};

/// Default id of the neutral culture that backs missing translations.
pub const NEUTRAL_CULTURE_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Culture whose localizations are used when the requested culture has none.
    pub neutral_culture_id: i64,
    /// Code of the URL-bearing member, compared case-insensitively.
    pub url_member_code: String,
    /// Page size used when a request enables paging without a take.
    pub default_take: u32,
    pub database: DatabaseConfig,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            neutral_culture_id: NEUTRAL_CULTURE_ID,
            url_member_code: "url".to_string(),
            default_take: 10,
            database: DatabaseConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file. `None` opens a private in-memory database.
    pub path: Option<String>,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DomainConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DomainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Serde(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.url_member_code.trim().is_empty() {
            return Err(DomainError::Validation(
                "url_member_code must not be empty".into(),
            ));
        }
        if self.default_take == 0 {
            return Err(DomainError::Validation("default_take must be positive".into()));
        }
        Ok(())
    }
}
