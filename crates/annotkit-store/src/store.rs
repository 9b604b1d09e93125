//! Annotation stores.
//!
//! A store is a passkey → document map with whole-document replacement.
//! [`MemoryStore`] backs tests and ephemeral sessions, [`FileStore`] keeps one
//! JSON file per passkey in a directory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use annotkit_core::StoreError;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::document::AnnotationDocument;
use crate::passkey::Passkey;

/// Async key-value access to annotation documents.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Loads the document saved under `passkey`, `None` if nothing was saved.
    async fn load(&self, passkey: &Passkey) -> Result<Option<AnnotationDocument>, StoreError>;

    /// Replaces the document saved under `passkey`.
    async fn save(&self, passkey: &Passkey, document: &AnnotationDocument)
        -> Result<(), StoreError>;
}

fn decode(passkey: &Passkey, text: &str) -> Result<AnnotationDocument, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Corrupted {
        passkey: passkey.to_string(),
        reason: e.to_string(),
    })
}

/// In-process store. Documents are kept serialized so a load always returns a
/// fresh copy, exactly as a remote store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Passkey, String>>,
    saves: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Raw stored JSON for `passkey`.
    pub fn raw(&self, passkey: &Passkey) -> Option<String> {
        self.documents.read().get(passkey).cloned()
    }

    /// Seeds the store with raw JSON, bypassing validation.
    pub fn insert_raw(&self, passkey: Passkey, json: impl Into<String>) {
        self.documents.write().insert(passkey, json.into());
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "memory store marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AnnotationStore for MemoryStore {
    async fn load(&self, passkey: &Passkey) -> Result<Option<AnnotationDocument>, StoreError> {
        self.check_available()?;
        let raw = self.documents.read().get(passkey).cloned();
        raw.map(|text| decode(passkey, &text)).transpose()
    }

    async fn save(
        &self,
        passkey: &Passkey,
        document: &AnnotationDocument,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let text = serde_json::to_string(document)?;
        self.documents.write().insert(passkey.clone(), text);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One pretty-printed `<passkey>.json` per collection under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, passkey: &Passkey) -> PathBuf {
        self.root.join(format!("{}.json", passkey))
    }
}

#[async_trait]
impl AnnotationStore for FileStore {
    async fn load(&self, passkey: &Passkey) -> Result<Option<AnnotationDocument>, StoreError> {
        let path = self.path_for(passkey);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => decode(passkey, &text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(
        &self,
        passkey: &Passkey,
        document: &AnnotationDocument,
    ) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(passkey);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(path = %path.display(), "Annotation document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Passkey {
        Passkey::parse("AB12cd34EF56").unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_corrupted_document() {
        let store = MemoryStore::new();
        store.insert_raw(key(), "{not json");
        let err = store.load(&key()).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_unavailable() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let err = store
            .save(&key(), &AnnotationDocument::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
        assert_eq!(store.save_count(), 0);
    }
}
