//! Typed property values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::StorageDataType;

/// A scalar property value, discriminated by its storage kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PropertyValue {
    Integer(i64),
    Decimal(f64),
    String(String),
    DateTime(DateTime<Utc>),
}

impl PropertyValue {
    pub fn storage_data_type(&self) -> StorageDataType {
        match self {
            PropertyValue::Integer(_) => StorageDataType::Integer,
            PropertyValue::Decimal(_) => StorageDataType::Decimal,
            PropertyValue::String(_) => StorageDataType::String,
            PropertyValue::DateTime(_) => StorageDataType::DateTime,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            PropertyValue::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::DateTime(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Integer(value) => write!(f, "{}", value),
            PropertyValue::Decimal(value) => write!(f, "{}", value),
            PropertyValue::String(value) => write!(f, "{}", value),
            PropertyValue::DateTime(value) => write!(f, "{}", value.to_rfc3339()),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Decimal(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(value)
    }
}
