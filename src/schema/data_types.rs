use std::fmt;
use std::str::FromStr;

use content_domain_macros::Record;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Primitive storage kind of a data type.
///
/// Decides which property column holds the value and how the query layer
/// sorts by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageDataType {
    Integer,
    Decimal,
    String,
    DateTime,
}

impl StorageDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageDataType::Integer => "integer",
            StorageDataType::Decimal => "decimal",
            StorageDataType::String => "string",
            StorageDataType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for StorageDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageDataType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integer" => Ok(StorageDataType::Integer),
            "decimal" => Ok(StorageDataType::Decimal),
            "string" => Ok(StorageDataType::String),
            "datetime" => Ok(StorageDataType::DateTime),
            other => Err(DomainError::Validation(format!(
                "unknown storage data type: {}",
                other
            ))),
        }
    }
}

impl ToSql for StorageDataType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for StorageDataType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: DomainError| FromSqlError::Other(Box::new(e)))
    }
}

/// A data type declares a storage kind plus UI-only parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "DataTypes")]
pub struct DataType {
    pub id: i64,
    pub storage_data_type: StorageDataType,
    pub java_script_editor_type: String,
    pub name: String,
    pub position: Option<i32>,
}

impl DataType {
    pub fn new(storage_data_type: StorageDataType, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            storage_data_type,
            java_script_editor_type: storage_data_type.as_str().to_string(),
            name: name.into(),
            position: None,
        }
    }
}

/// A named parameter of a data type (e.g. "maxLength"), used for editors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "DataTypeParameters")]
pub struct DataTypeParameter {
    pub id: i64,
    pub data_type_id: i64,
    pub java_script_editor_type: String,
    pub code: String,
    pub name: String,
}

/// The value of a data type parameter for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "DataTypeParameterValues")]
pub struct DataTypeParameterValue {
    pub id: i64,
    pub data_type_parameter_id: i64,
    pub member_id: i64,
    pub value: String,
}
