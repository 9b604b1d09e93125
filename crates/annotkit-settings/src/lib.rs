//! AnnotKit Settings Crate
//!
//! Handles viewer configuration and its persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, PersistenceSettings, UiSettings};
pub use error::{SettingsError, SettingsResult};
