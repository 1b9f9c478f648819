//! Serialized-properties document and the dynamic view objects decoded from it.
//!
//! The document is an ordered JSON array, one entry per scalar member:
//!
//! ```text
//! [{"memberId":3,"code":"title","value":{"type":"string","value":"Hello"}}, ...]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::SerializedObject;
use crate::value::PropertyValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedProperty {
    pub member_id: i64,
    pub code: String,
    pub value: PropertyValue,
}

/// Ordered {member code -> typed value} map of one object in one culture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedDocument {
    properties: Vec<SerializedProperty>,
}

impl SerializedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, member_id: i64, code: impl Into<String>, value: PropertyValue) {
        self.properties.push(SerializedProperty {
            member_id,
            code: code.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn properties(&self) -> &[SerializedProperty] {
        &self.properties
    }

    pub fn get(&self, code: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.code == code)
            .map(|p| &p.value)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A property of a view object: scalar or a loaded relation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewValue {
    Scalar(PropertyValue),
    Objects(Vec<ViewObject>),
}

/// Dynamic object handed to renderers: id, class and named properties.
///
/// Property codes are matched case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewObject {
    pub id: i64,
    pub class_id: i64,
    properties: Vec<(String, ViewValue)>,
}

impl ViewObject {
    pub fn new(id: i64, class_id: i64) -> Self {
        Self {
            id,
            class_id,
            properties: Vec::new(),
        }
    }

    /// Decode a cache row into a view object with its scalar properties.
    pub fn from_serialized(serialized_object: &SerializedObject) -> Result<Self> {
        let document = SerializedDocument::decode(&serialized_object.serialized_properties)?;
        let mut view = ViewObject::new(serialized_object.object_id, serialized_object.class_id);
        for property in document.properties {
            view.set(property.code, ViewValue::Scalar(property.value));
        }
        Ok(view)
    }

    /// Set a property, replacing any existing one with the same code.
    pub fn set(&mut self, code: impl Into<String>, value: ViewValue) {
        let code = code.into();
        match self
            .properties
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&code))
        {
            Some(slot) => slot.1 = value,
            None => self.properties.push((code, value)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&ViewValue> {
        self.properties
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(code))
            .map(|(_, value)| value)
    }

    pub fn scalar(&self, code: &str) -> Option<&PropertyValue> {
        match self.get(code)? {
            ViewValue::Scalar(value) => Some(value),
            ViewValue::Objects(_) => None,
        }
    }

    pub fn objects(&self, code: &str) -> Option<&[ViewObject]> {
        match self.get(code)? {
            ViewValue::Objects(objects) => Some(objects),
            ViewValue::Scalar(_) => None,
        }
    }

    pub fn objects_mut(&mut self, code: &str) -> Option<&mut Vec<ViewObject>> {
        self.properties
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(code))
            .and_then(|(_, value)| match value {
                ViewValue::Objects(objects) => Some(objects),
                ViewValue::Scalar(_) => None,
            })
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &ViewValue)> {
        self.properties.iter().map(|(code, value)| (code.as_str(), value))
    }
}
