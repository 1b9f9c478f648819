//! SQLite implementation of every repository.
//!
//! [`SqliteStorage`] owns the connection; [`SqliteSession`] borrows it for one
//! request and implements [`crate::Storage`] and [`crate::Transactional`].
//!
//! ```ignore
//! let storage = SqliteStorage::open(&config)?;
//! let session = storage.session();
//! let members = session.members_by_class_including_parent(class_id)?;
//! ```

mod classes;
mod cultures;
mod data_types;
mod objects;
mod records;
mod schema;
mod serialized_objects;
mod storage;

use rusqlite::types::{ToSql, ToSqlOutput};

use crate::sql::SqlValue;

pub use schema::init_schema;
pub use storage::{SqliteSession, SqliteStorage};

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Integer(value) => value.to_sql(),
            SqlValue::Text(value) => value.to_sql(),
        }
    }
}
