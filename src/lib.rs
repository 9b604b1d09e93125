//! # AnnotKit
//!
//! An interactive annotation layer for images: circles, rectangles, ellipses
//! and bidirectional calipers drawn over the image, with live measurements and
//! passkey-scoped, debounced persistence.
//!
//! ## Architecture
//!
//! AnnotKit is organized as a workspace with multiple crates:
//!
//! 1. **annotkit-core** - Shared error types
//! 2. **annotkit-engine** - Shape model, hit-testing, interaction state machine, rendering
//! 3. **annotkit-store** - Passkeys, annotation stores, debounced persistence adapter
//! 4. **annotkit-settings** - JSON/TOML configuration
//! 5. **annotkit-viewer** - Viewer integration, toolbar and shape list
//! 6. **annotkit** - Logging setup, event-script replay and the command line binary

pub mod replay;

pub use annotkit_core::{ColorError, PasskeyError, StoreError};
pub use annotkit_engine::{
    AnnotationSession, Color, EngineConfig, Geometry, InteractionOutcome, Point, Shape, ShapeId,
    ShapeKind, PALETTE,
};
pub use annotkit_settings::Config;
pub use annotkit_store::{AnnotationStore, FileStore, MemoryStore, Passkey, PersistenceAdapter};
pub use annotkit_viewer::{ImageInfo, ShapeList, Toolbar, Viewer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
