//! Schema - records of the dynamic domain.
//!
//! Classes and members are defined at runtime; objects carry one property
//! row per scalar member and relation rows per relation member. The
//! serialized object is the per-culture denormalized cache row read by the
//! query layer.

mod classes;
mod data_types;
mod globalization;
mod objects;

pub use classes::{Class, Member};
pub use data_types::{DataType, DataTypeParameter, DataTypeParameterValue, StorageDataType};
pub use globalization::{Culture, Localization};
pub use objects::{Object, Property, Relation, SerializedObject};
