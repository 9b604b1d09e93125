//! Persistence adapter.
//!
//! Bridges the session's "something changed" signals to an
//! [`AnnotationStore`]. Edits mark the collection dirty and are written after
//! a quiet window; the end of a drag flushes right away. Store failures never
//! reach the caller: they are logged and remembered so the host can show a
//! non-blocking notice.

use std::sync::Arc;
use std::time::Duration;

use annotkit_engine::Shape;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::debounce::Debouncer;
use crate::document::AnnotationDocument;
use crate::passkey::Passkey;
use crate::store::AnnotationStore;

/// Default quiet window before a debounced save.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// A save or load that did not reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistFailure {
    pub at: DateTime<Utc>,
    pub message: String,
}

pub struct PersistenceAdapter {
    store: Arc<dyn AnnotationStore>,
    passkey: Option<Passkey>,
    image_name: String,
    image_url: String,
    debouncer: Debouncer,
    last_failure: Option<PersistFailure>,
    saves: u64,
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("passkey", &self.passkey)
            .field("image_name", &self.image_name)
            .field("debouncer", &self.debouncer)
            .field("saves", &self.saves)
            .finish_non_exhaustive()
    }
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn AnnotationStore>, debounce: Duration) -> Self {
        Self {
            store,
            passkey: None,
            image_name: String::new(),
            image_url: String::new(),
            debouncer: Debouncer::new(debounce),
            last_failure: None,
            saves: 0,
        }
    }

    /// Sets the image metadata written alongside the annotations.
    pub fn with_image(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.image_name = name.into();
        self.image_url = url.into();
        self
    }

    pub fn passkey(&self) -> Option<&Passkey> {
        self.passkey.as_ref()
    }

    /// Binds the adapter to `passkey` and loads its collection.
    ///
    /// Best effort: a missing or unreadable document yields an empty
    /// collection, and the failure is recorded.
    pub async fn open(&mut self, passkey: Passkey) -> Vec<Shape> {
        self.debouncer.cancel();
        let loaded = self.store.load(&passkey).await;
        self.passkey = Some(passkey);
        match loaded {
            Ok(Some(document)) => {
                tracing::info!(
                    passkey = %self.passkey_label(),
                    count = document.annotations.len(),
                    "Annotations loaded"
                );
                document.annotations
            }
            Ok(None) => {
                tracing::info!(passkey = %self.passkey_label(), "No saved annotations");
                Vec::new()
            }
            Err(e) => {
                self.record_failure(format!("Failed to load annotations: {}", e));
                Vec::new()
            }
        }
    }

    /// Forgets the passkey and any pending save.
    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.passkey = None;
    }

    /// (Re)starts the debounce window.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Saves if the debounce window has elapsed. Returns true if a save
    /// reached the store.
    pub async fn poll(&mut self, now: Instant, shapes: &[Shape]) -> bool {
        if !self.debouncer.take_due(now) {
            return false;
        }
        self.save(shapes).await
    }

    /// Saves immediately, cancelling any pending debounced save.
    pub async fn flush(&mut self, shapes: &[Shape]) -> bool {
        self.debouncer.cancel();
        self.save(shapes).await
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    pub fn last_failure(&self) -> Option<&PersistFailure> {
        self.last_failure.as_ref()
    }

    /// Dismisses the failure notice.
    pub fn clear_failure(&mut self) {
        self.last_failure = None;
    }

    async fn save(&mut self, shapes: &[Shape]) -> bool {
        let Some(passkey) = self.passkey.clone() else {
            tracing::debug!("Skipping save without a passkey");
            return false;
        };
        let document =
            AnnotationDocument::new(self.image_name.clone(), self.image_url.clone(), shapes.to_vec());
        match self.store.save(&passkey, &document).await {
            Ok(()) => {
                self.saves += 1;
                self.last_failure = None;
                tracing::info!(passkey = %passkey, count = shapes.len(), "Annotations saved");
                true
            }
            Err(e) => {
                self.record_failure(format!("Failed to save annotations: {}", e));
                false
            }
        }
    }

    fn passkey_label(&self) -> String {
        self.passkey
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn record_failure(&mut self, message: String) {
        tracing::warn!(passkey = %self.passkey_label(), "{}", message);
        self.last_failure = Some(PersistFailure {
            at: Utc::now(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_save_without_passkey_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let mut adapter = PersistenceAdapter::new(store.clone(), DEFAULT_DEBOUNCE);
        assert!(!adapter.flush(&[]).await);
        assert_eq!(store.save_count(), 0);
        assert!(adapter.last_failure().is_none());
    }

    #[tokio::test]
    async fn test_poll_before_deadline_does_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut adapter = PersistenceAdapter::new(store.clone(), DEFAULT_DEBOUNCE);
        adapter.open(Passkey::generate()).await;
        let now = Instant::now();
        adapter.mark_dirty(now);
        assert!(!adapter.poll(now + Duration::from_millis(999), &[]).await);
        assert!(adapter.is_dirty());
        assert!(adapter.poll(now + Duration::from_millis(1000), &[]).await);
        assert!(!adapter.is_dirty());
    }
}
