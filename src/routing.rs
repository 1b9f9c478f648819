//! URL resolution of content objects through the memoization cache.

use std::sync::Arc;

use log::debug;

use crate::cache::MemoCache;
use crate::document::ViewObject;
use crate::error::Result;
use crate::repository::SerializedObjectRepository;

pub struct UrlResolver {
    cache: Arc<MemoCache>,
}

impl UrlResolver {
    pub fn new(cache: Arc<MemoCache>) -> Self {
        Self { cache }
    }

    /// The object whose URL member equals `url` (ASCII case-insensitive) in
    /// `culture_id`. Misses are cached as well until the next invalidation.
    pub fn resolve<S>(&self, storage: &S, culture_id: i64, url: &str) -> Result<Option<ViewObject>>
    where
        S: SerializedObjectRepository + ?Sized,
    {
        let key = format!("url:{}:{}", culture_id, url.to_ascii_lowercase());

        let view = self.cache.get_or_try_insert_with(&key, || {
            debug!("resolving {:?} in culture {}", url, culture_id);
            storage
                .serialized_object_with_url(culture_id, url)?
                .as_ref()
                .map(ViewObject::from_serialized)
                .transpose()
        })?;

        Ok((*view).clone())
    }
}
