//! Repository traits, one per area of the store.
//!
//! Method names carry their entity (`member_with_key`, `create_class`, ...)
//! so the traits never collide when combined into [`Storage`].

mod schema;
mod globalization;
mod objects;
mod serialized_objects;

pub use globalization::CultureRepository;
pub use objects::ObjectRepository;
pub use schema::{ClassRepository, DataTypeRepository, MemberRepository};
pub use serialized_objects::SerializedObjectRepository;

use crate::error::Result;

/// Everything the core needs from a store.
pub trait Storage:
    ClassRepository
    + MemberRepository
    + DataTypeRepository
    + CultureRepository
    + ObjectRepository
    + SerializedObjectRepository
{
}

// Blanket implementation: anything implementing all repositories is a Storage
impl<T> Storage for T where
    T: ClassRepository
        + MemberRepository
        + DataTypeRepository
        + CultureRepository
        + ObjectRepository
        + SerializedObjectRepository
{
}

/// Stores that can run a unit of work atomically.
pub trait Transactional {
    /// Run `work` inside a transaction (nested calls become savepoints).
    /// Commits when `work` returns `Ok`, rolls back otherwise.
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>;
}
