//! # AnnotKit Engine
//!
//! Interactive annotation layer drawn over an image. Users place, select,
//! move, resize, lock and describe shapes; the engine reports measurements and
//! tells the host when to redraw and when to persist.
//!
//! ## Core Components
//!
//! - **Model**: Circles, rectangles, ellipses and four-point bidirectional
//!   calipers, stored in image-native coordinates
//! - **Hit-Testing**: Boundary-only shape hits and square handle regions
//! - **Interaction**: Pointer-driven state machine (draw, select, drag) plus
//!   out-of-band edits from the shape list
//! - **Render**: Pure display-list builder, cursor feedback, per-frame redraw
//!   gate and a `tiny-skia` rasterizer
//! - **Viewport**: Zoom, pan and rotation mapping between screen and image
//!
//! ## Architecture
//!
//! ```text
//! AnnotationSession (shapes, active id, mode)
//!   ├── interaction  (pointer_down / pointer_move / pointer_up, actions)
//!   ├── hit_test     (find_shape_at_point, find_handle_at_point)
//!   └── render       (build_display_list → rasterize)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use annotkit_engine::{AnnotationSession, EngineConfig, Point, ShapeKind, PALETTE};
//!
//! let mut session = AnnotationSession::new(EngineConfig::default());
//! session.select_tool(Some(ShapeKind::Circle), PALETTE[0]);
//! let outcome = session.pointer_down(Point::new(100.0, 100.0));
//! assert!(outcome.redraw);
//! assert_eq!(session.len(), 1);
//! ```

pub mod config;
pub mod interaction;
pub mod model;
pub mod render;
pub mod session;
pub mod viewport;

pub use config::EngineConfig;
pub use hit_test::{find_handle_at_point, find_shape_at_point, handle_positions};
pub use interaction::{DragMode, DragState, InteractionOutcome, InteractionState, PersistRequest};
pub use model::{
    compute_area, measurement_label, segment_length, AnnotationGeometry, Bidirectional, Circle,
    Color, Ellipse, Geometry, Handle, Point, Rectangle, Shape, ShapeId, ShapeKind, PALETTE,
};
pub use render::{
    build_display_list, cursor_for, rasterize, Cursor, DisplayList, DrawCommand, FrameGate,
    Outline, RenderOptions, StrokeStyle,
};
pub use session::{AnnotationSession, IdGenerator, MAX_SHAPE_ID};
pub use viewport::Viewport;
