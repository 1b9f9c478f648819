use content_domain_macros::Record;
use serde::{Deserialize, Serialize};

/// A user-defined entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Classes")]
pub struct Class {
    pub id: i64,
    /// Parent class whose members are inherited.
    #[record(column = "ClassId")]
    pub parent_id: Option<i64>,
    pub code: String,
    pub name: String,
}

impl Class {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            parent_id: None,
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// A typed or relation-valued field of a class.
///
/// Exactly one of `property_data_type_id` and `relation_class_id` is
/// expected to be set; a member with a relation class is always treated as
/// a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(table = "Members")]
pub struct Member {
    pub id: i64,
    pub class_id: i64,
    pub code: String,
    pub name: String,
    pub position: Option<i32>,
    pub property_data_type_id: Option<i64>,
    pub relation_class_id: Option<i64>,
}

impl Member {
    pub fn property(class_id: i64, code: impl Into<String>, data_type_id: i64) -> Self {
        let code = code.into();
        Self {
            id: 0,
            class_id,
            name: code.clone(),
            code,
            position: None,
            property_data_type_id: Some(data_type_id),
            relation_class_id: None,
        }
    }

    pub fn relation(class_id: i64, code: impl Into<String>, relation_class_id: i64) -> Self {
        let code = code.into();
        Self {
            id: 0,
            class_id,
            name: code.clone(),
            code,
            position: None,
            property_data_type_id: None,
            relation_class_id: Some(relation_class_id),
        }
    }

    pub fn at_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_relation(&self) -> bool {
        self.relation_class_id.is_some()
    }

    /// Data type of a scalar member; `None` for relations.
    pub fn scalar_data_type_id(&self) -> Option<i64> {
        if self.is_relation() {
            None
        } else {
            self.property_data_type_id
        }
    }
}
