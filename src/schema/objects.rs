use chrono::{DateTime, Utc};
use content_domain_macros::Record;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::schema::StorageDataType;
use crate::value::PropertyValue;

/// An instance of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Objects")]
pub struct Object {
    pub id: i64,
    pub class_id: i64,
}

/// Raw value of one member for one object.
///
/// The column read is selected by the member's storage kind; string values
/// point at a dictionary whose localizations hold the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "Properties")]
pub struct Property {
    pub id: i64,
    pub object_id: i64,
    pub member_id: i64,
    pub integer_value: Option<i64>,
    pub decimal_value: Option<f64>,
    pub string_value_id: Option<i64>,
    pub date_time_value: Option<DateTime<Utc>>,
}

impl Property {
    pub fn new(object_id: i64, member_id: i64) -> Self {
        Self {
            id: 0,
            object_id,
            member_id,
            integer_value: None,
            decimal_value: None,
            string_value_id: None,
            date_time_value: None,
        }
    }

    /// Read the value under `kind`; string values are looked up by
    /// dictionary id through `localize`.
    ///
    /// Fails with a validation error when the column `kind` selects is empty.
    pub fn value<F>(&self, kind: StorageDataType, localize: F) -> Result<PropertyValue>
    where
        F: FnOnce(i64) -> Result<String>,
    {
        let value = match kind {
            StorageDataType::Integer => self.integer_value.map(PropertyValue::Integer),
            StorageDataType::Decimal => self.decimal_value.map(PropertyValue::Decimal),
            StorageDataType::DateTime => self.date_time_value.map(PropertyValue::DateTime),
            StorageDataType::String => match self.string_value_id {
                Some(dictionary_id) => Some(PropertyValue::String(localize(dictionary_id)?)),
                None => None,
            },
        };

        value.ok_or_else(|| {
            DomainError::Validation(format!(
                "property of object {} for member {} has no {} value",
                self.object_id, self.member_id, kind
            ))
        })
    }
}

/// Directed edge: `foreign_id` references `primary_id` through `member_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Relations")]
pub struct Relation {
    pub id: i64,
    pub member_id: i64,
    pub primary_id: i64,
    pub foreign_id: i64,
}

/// Per-culture cache row of an object's scalar properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "SerializedObjects")]
pub struct SerializedObject {
    #[record(key)]
    pub culture_id: i64,
    #[record(key)]
    pub object_id: i64,
    pub class_id: i64,
    pub url_property_string_value: Option<String>,
    /// Encoded [`crate::document::SerializedDocument`].
    pub serialized_properties: String,
}
