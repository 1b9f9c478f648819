//! Object edit events and their handlers.

use std::sync::Arc;

use log::debug;

use crate::cache::MemoCache;
use crate::config::DomainConfig;
use crate::error::Result;
use crate::repository::Storage;
use crate::schema::Object;
use crate::serialization::SerializationManager;

/// Reacts to objects being edited or deleted.
///
/// `on_object_edited` and `on_object_deleted` run inside the editing
/// transaction; an error rolls the edit back. `on_objects_committed` runs once
/// the transaction has been committed, with every object it touched.
pub trait ObjectEventHandler<S: ?Sized>: Send + Sync {
    /// Lower priorities run first.
    fn priority(&self) -> i32 {
        0
    }

    /// `old` is `None` for a newly created object.
    fn on_object_edited(&self, storage: &S, old: Option<&Object>, new: &Object) -> Result<()>;

    fn on_object_deleted(&self, _storage: &S, _object: &Object) -> Result<()> {
        Ok(())
    }

    fn on_objects_committed(&self, _storage: &S, _objects: &[Object]) -> Result<()> {
        Ok(())
    }
}

/// Registered handlers, dispatched in priority order.
pub struct ObjectEvents<S: ?Sized> {
    handlers: Vec<Box<dyn ObjectEventHandler<S>>>,
}

impl<S: ?Sized> Default for ObjectEvents<S> {
    fn default() -> Self {
        Self { handlers: Vec::new() }
    }
}

impl<S: ?Sized> ObjectEvents<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. Handlers of equal priority keep registration order.
    pub fn register<H>(&mut self, handler: H) -> &mut Self
    where
        H: ObjectEventHandler<S> + 'static,
    {
        self.handlers.push(Box::new(handler));
        self.handlers.sort_by_key(|handler| handler.priority());
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn object_edited(&self, storage: &S, old: Option<&Object>, new: &Object) -> Result<()> {
        debug!("object {} edited, {} handler(s)", new.id, self.handlers.len());
        for handler in &self.handlers {
            handler.on_object_edited(storage, old, new)?;
        }
        Ok(())
    }

    pub fn object_deleted(&self, storage: &S, object: &Object) -> Result<()> {
        debug!("object {} deleted, {} handler(s)", object.id, self.handlers.len());
        for handler in &self.handlers {
            handler.on_object_deleted(storage, object)?;
        }
        Ok(())
    }

    pub fn objects_committed(&self, storage: &S, objects: &[Object]) -> Result<()> {
        debug!("{} object(s) committed, {} handler(s)", objects.len(), self.handlers.len());
        for handler in &self.handlers {
            handler.on_objects_committed(storage, objects)?;
        }
        Ok(())
    }
}

/// Default handler: rebuild the cache rows of the edited object inside the
/// transaction, then drop the whole memoization cache after commit.
///
/// The flush must follow the commit, otherwise a concurrent reader can
/// memoize the old rows under the new generation.
pub struct SerializedObjectRebuilder {
    config: DomainConfig,
    cache: Arc<MemoCache>,
}

impl SerializedObjectRebuilder {
    pub const PRIORITY: i32 = 1000;

    pub fn new(config: DomainConfig, cache: Arc<MemoCache>) -> Self {
        Self { config, cache }
    }
}

impl<S: Storage + ?Sized> ObjectEventHandler<S> for SerializedObjectRebuilder {
    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn on_object_edited(&self, storage: &S, _old: Option<&Object>, new: &Object) -> Result<()> {
        SerializationManager::new(storage, &self.config).serialize_object(new)
    }

    fn on_objects_committed(&self, _storage: &S, _objects: &[Object]) -> Result<()> {
        self.cache.invalidate_all()
    }
}
