//! # AnnotKit Store
//!
//! Passkey-scoped persistence for annotation collections:
//! - [`Passkey`] validation and generation
//! - [`AnnotationStore`] async trait with in-memory and file backends
//! - [`Debouncer`] and the [`PersistenceAdapter`] that drives saves

pub mod adapter;
pub mod debounce;
pub mod document;
pub mod passkey;
pub mod store;

pub use adapter::{PersistFailure, PersistenceAdapter, DEFAULT_DEBOUNCE};
pub use debounce::Debouncer;
pub use document::AnnotationDocument;
pub use passkey::{Passkey, PASSKEY_LEN};
pub use store::{AnnotationStore, FileStore, MemoryStore};
