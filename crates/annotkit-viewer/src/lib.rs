//! # AnnotKit Viewer
//!
//! Headless integration of the annotation engine with persistence: the
//! passkey gate, toolbar, shape list, render scheduling and the
//! screen ↔ image mapping. A GUI binds its widgets to [`Viewer`].

pub mod shape_list;
pub mod toolbar;
pub mod viewer;

pub use shape_list::{ShapeList, ShapeListEntry};
pub use toolbar::{ToolEntry, Toolbar};
pub use viewer::{ImageInfo, Viewer};
