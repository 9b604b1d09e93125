//! # AnnotKit Core
//!
//! Error taxonomy shared by the annotation engine, the persistence layer and
//! the viewer integration.

pub mod error;

pub use error::{ColorError, PasskeyError, StoreError};
