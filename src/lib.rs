extern crate self as content_domain;

mod cache;
mod config;
mod data_source;
mod document;
mod editing;
mod error;
mod events;
mod nested;
mod record;
mod registry;
mod repository;
mod routing;
mod serialization;
mod value;

pub mod query;
pub mod schema;
pub mod sql;
pub mod sqlite;

pub use cache::MemoCache;
pub use config::{DatabaseConfig, DomainConfig, NEUTRAL_CULTURE_ID};
pub use data_source::{load_nested_objects, params_from_args, view_object, DataSourceArgs};
pub use document::{SerializedDocument, SerializedProperty, ViewObject, ViewValue};
pub use editing::{set_data_type_parameter_values, MemberEditor, ObjectEditor, ObjectInput, PropertyInput};
pub use error::{DomainError, Result};
pub use events::{ObjectEventHandler, ObjectEvents, SerializedObjectRebuilder};
pub use nested::{parse_paths, NestedObjectLoader};
pub use record::Record;
pub use registry::TypeRegistry;
pub use repository::{
    ClassRepository, CultureRepository, DataTypeRepository, MemberRepository, ObjectRepository,
    SerializedObjectRepository, Storage, Transactional,
};
pub use routing::UrlResolver;
pub use serialization::SerializationManager;
pub use value::PropertyValue;

// Derive macro for `Record`
pub use content_domain_macros::Record;

// Re-exported for code generated by `#[derive(Record)]`
pub use rusqlite;
