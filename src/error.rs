use std::fmt;

/// Error type shared by every repository and manager in the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A lookup by id (or composite key) found nothing.
    NotFound { entity: &'static str, key: String },
    /// Stored or submitted data is inconsistent with the schema.
    Validation(String),
    /// A caller-side precondition does not hold.
    Precondition(String),
    /// The underlying store failed to execute a statement.
    QueryExecution(String),
    /// Document or configuration (de)serialization failed.
    Serde(String),
    /// A process-wide lock was poisoned by a panicking holder.
    LockPoisoned(&'static str),
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound { entity, key } => write!(f, "{} not found: {}", entity, key),
            DomainError::Validation(msg) => write!(f, "validation failed: {}", msg),
            DomainError::Precondition(msg) => write!(f, "precondition failed: {}", msg),
            DomainError::QueryExecution(msg) => write!(f, "query execution failed: {}", msg),
            DomainError::Serde(msg) => write!(f, "serialization error: {}", msg),
            DomainError::LockPoisoned(operation) => {
                write!(f, "lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::QueryExecution(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serde(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
