//! Background icon loading on a small worker pool.
//!
//! Requests are answered from the cache when possible. Misses are resolved
//! on blocking workers, at most `workers` at a time, and the outcome is
//! posted to the owner's event channel once the cache has been updated.

use std::sync::Arc;

use gamehub_library::{EntryRef, GameRecord};
use tokio::sync::{Semaphore, mpsc};
use tracing::{trace, warn};

use crate::IconImage;
use crate::cache::IconCache;
use crate::resolver::IconResolver;

/// Completion notice for a background icon request.
#[derive(Debug, Clone)]
pub struct IconResolved {
    pub entry: EntryRef,
    /// `None` when the game has no usable icon.
    pub icon: Option<IconImage>,
}

/// Immediate answer to an icon request.
#[derive(Debug, Clone)]
pub enum IconRequest {
    /// Served from the cache.
    Ready(IconImage),
    /// Resolution started; an [`IconResolved`] event will follow.
    Pending,
}

/// Resolves icons off the caller's task.
///
/// `E` is the owner's event type; completions are converted with
/// `E::from(IconResolved)`.
pub struct IconLoader<E> {
    cache: Arc<IconCache>,
    resolver: Arc<IconResolver>,
    permits: Arc<Semaphore>,
    events_tx: mpsc::Sender<E>,
}

impl<E> IconLoader<E>
where
    E: From<IconResolved> + Send + 'static,
{
    pub fn new(
        cache: Arc<IconCache>,
        resolver: Arc<IconResolver>,
        workers: usize,
        events_tx: mpsc::Sender<E>,
    ) -> Self {
        Self {
            cache,
            resolver,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            events_tx,
        }
    }

    pub fn cache(&self) -> &Arc<IconCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &Arc<IconResolver> {
        &self.resolver
    }

    /// Returns the cached icon or starts resolving it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&self, record: &GameRecord) -> IconRequest {
        if let Some(icon) = self.cache.get(record.entry()) {
            return IconRequest::Ready(icon);
        }

        let record = record.clone();
        let cache = Arc::clone(&self.cache);
        let resolver = Arc::clone(&self.resolver);
        let permits = Arc::clone(&self.permits);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };

            let entry = record.entry().clone();
            // A request queued behind an identical one finds the cache warm.
            let icon = match tokio::task::spawn_blocking(move || {
                cache.get_or_resolve(&record, &resolver)
            })
            .await
            {
                Ok(icon) => icon,
                Err(e) => {
                    warn!(entry = %entry, error = %e, "icon worker failed");
                    None
                }
            };

            trace!(entry = %entry, found = icon.is_some(), "icon request finished");
            if events_tx
                .send(E::from(IconResolved { entry, icon }))
                .await
                .is_err()
            {
                trace!("icon event receiver dropped");
            }
        });

        IconRequest::Pending
    }
}
