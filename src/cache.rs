//! Process-wide memoization cache with wholesale invalidation.
//!
//! Every entry records the generation it was computed under. An edit bumps
//! the generation and clears the map; a value computed while an edit was in
//! flight carries a stale generation and is never stored.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::info;

use crate::error::{DomainError, Result};

type Value = Arc<dyn Any + Send + Sync>;

struct Entry {
    generation: u64,
    value: Value,
}

#[derive(Default)]
pub struct MemoCache {
    generation: AtomicU64,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cached value for `key` if present, current and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Option<Arc<T>>> {
        let generation = self.generation();
        let entries = self.entries.lock().map_err(|_| DomainError::LockPoisoned("memo cache"))?;

        Ok(entries
            .get(key)
            .filter(|entry| entry.generation == generation)
            .and_then(|entry| entry.value.clone().downcast::<T>().ok()))
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// `compute` runs without the lock held. Its result is stored only if no
    /// invalidation happened meanwhile.
    pub fn get_or_try_insert_with<T, F>(&self, key: &str, compute: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get::<T>(key)? {
            return Ok(value);
        }

        let generation = self.generation();
        let value = Arc::new(compute()?);

        let mut entries = self.entries.lock().map_err(|_| DomainError::LockPoisoned("memo cache"))?;
        if self.generation() == generation {
            entries.insert(
                key.to_string(),
                Entry {
                    generation,
                    value: value.clone(),
                },
            );
        }
        Ok(value)
    }

    /// Drop everything and start a new generation.
    pub fn invalidate_all(&self) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| DomainError::LockPoisoned("memo cache"))?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let dropped = entries.len();
        entries.clear();

        info!("memo cache invalidated: generation {}, {} entr(ies) dropped", generation, dropped);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| DomainError::LockPoisoned("memo cache"))?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
