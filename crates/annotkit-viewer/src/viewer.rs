//! Viewer integration.
//!
//! A [`Viewer`] owns one annotation session together with its persistence
//! adapter, frame gate, viewport and toolbar. Nothing is drawn and pointer
//! input is dropped until a valid passkey unlocks the viewer.
//!
//! Event handlers are synchronous and never wait on the store. They update the
//! session, request a frame when the canvas changed, and mark the collection
//! dirty (or due for an immediate flush). The host's event loop calls
//! [`Viewer::tick`] to carry out the saves and [`Viewer::on_frame`] once per
//! animation frame.

use std::sync::Arc;

use annotkit_core::{ColorError, PasskeyError};
use annotkit_engine::{
    build_display_list, cursor_for, rasterize, AnnotationSession, Color, Cursor, DisplayList,
    EngineConfig, FrameGate, InteractionOutcome, PersistRequest, Point, RenderOptions, ShapeId,
    ShapeKind, Viewport,
};
use annotkit_settings::{Config, SettingsResult};
use annotkit_store::{AnnotationStore, Passkey, PersistFailure, PersistenceAdapter};
use tiny_skia::Pixmap;
use tokio::time::Instant;

use crate::shape_list::ShapeList;
use crate::toolbar::Toolbar;

/// The image being annotated.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub name: String,
    pub url: String,
    pub width: f64,
    pub height: f64,
}

impl ImageInfo {
    pub fn new(name: impl Into<String>, url: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            width,
            height,
        }
    }
}

pub struct Viewer {
    session: AnnotationSession,
    adapter: PersistenceAdapter,
    frames: FrameGate,
    viewport: Viewport,
    toolbar: Toolbar,
    image: ImageInfo,
    visible: bool,
    unlocked: bool,
    flush_requested: bool,
}

impl Viewer {
    /// Creates a locked viewer whose canvas initially matches the image size.
    pub fn new(
        engine: EngineConfig,
        adapter: PersistenceAdapter,
        palette: Vec<Color>,
        image: ImageInfo,
    ) -> Self {
        Self {
            session: AnnotationSession::new(engine),
            adapter,
            frames: FrameGate::new(),
            viewport: Viewport::new(image.width, image.height, image.width, image.height),
            toolbar: Toolbar::new(palette),
            image,
            visible: true,
            unlocked: false,
            flush_requested: false,
        }
    }

    /// Builds a viewer from settings, writing through `store`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn AnnotationStore>,
        image: ImageInfo,
    ) -> SettingsResult<Self> {
        let palette = config.palette_colors()?;
        let adapter = PersistenceAdapter::new(store, config.debounce())
            .with_image(image.name.clone(), image.url.clone());
        let mut viewer = Self::new(config.engine.clone(), adapter, palette, image);
        viewer.visible = config.ui.annotations_visible;
        Ok(viewer)
    }

    pub fn image(&self) -> &ImageInfo {
        &self.image
    }

    pub fn session(&self) -> &AnnotationSession {
        &self.session
    }

    pub fn adapter(&self) -> &PersistenceAdapter {
        &self.adapter
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame_gate(&self) -> &FrameGate {
        &self.frames
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn annotations_visible(&self) -> bool {
        self.visible
    }

    /// Validates `input` and loads the collection saved under it.
    ///
    /// Invalid passkeys are rejected before the store is touched. Load
    /// failures are not errors: the viewer opens with an empty collection.
    pub async fn unlock(&mut self, input: &str) -> Result<usize, PasskeyError> {
        let passkey = Passkey::parse(input)?;
        if self.unlocked {
            self.close().await;
        }
        let shapes = self.adapter.open(passkey).await;
        let count = shapes.len();
        self.session.replace_shapes(shapes);
        self.toolbar.set_tool(None);
        self.unlocked = true;
        self.frames.request();
        tracing::info!(image = %self.image.name, count, "Viewer unlocked");
        Ok(count)
    }

    /// Saves outstanding changes and locks the viewer again.
    pub async fn close(&mut self) {
        if self.adapter.is_dirty() || self.flush_requested {
            self.adapter.flush(self.session.shapes()).await;
        }
        self.flush_requested = false;
        self.adapter.close();
        self.session.replace_shapes(Vec::new());
        self.unlocked = false;
        self.frames.request();
    }

    fn accepts_input(&self) -> bool {
        self.unlocked && self.visible
    }

    fn route(&mut self, outcome: InteractionOutcome) -> InteractionOutcome {
        if outcome.redraw {
            self.frames.request();
        }
        match outcome.persist {
            PersistRequest::None => {}
            PersistRequest::Debounced => self.adapter.mark_dirty(Instant::now()),
            PersistRequest::Immediate => self.flush_requested = true,
        }
        // placement or abandonment ends the drawing gesture
        if !self.session.is_drawing() {
            self.toolbar.set_tool(None);
        }
        outcome
    }

    pub fn pointer_down(&mut self, screen: Point) -> InteractionOutcome {
        if !self.accepts_input() {
            return InteractionOutcome::none();
        }
        let p = self.viewport.screen_to_image(screen);
        let outcome = self.session.pointer_down(p);
        self.route(outcome)
    }

    pub fn pointer_move(&mut self, screen: Point) -> InteractionOutcome {
        if !self.accepts_input() {
            return InteractionOutcome::none();
        }
        let p = self.viewport.screen_to_image(screen);
        let outcome = self.session.pointer_move(p);
        self.route(outcome)
    }

    pub fn pointer_up(&mut self, screen: Point) -> InteractionOutcome {
        if !self.accepts_input() {
            return InteractionOutcome::none();
        }
        let p = self.viewport.screen_to_image(screen);
        let outcome = self.session.pointer_up(p);
        self.route(outcome)
    }

    /// Toolbar tool button. `None` returns to selection.
    pub fn select_tool(&mut self, tool: Option<ShapeKind>) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.select_tool(tool, self.toolbar.color());
        self.toolbar.set_tool(tool);
        self.route(outcome)
    }

    /// Palette swatch for the next shape, including one whose tool is
    /// already selected.
    pub fn select_palette(&mut self, index: usize) -> Option<Color> {
        let color = self.toolbar.select_palette(index)?;
        self.apply_toolbar_color(color);
        Some(color)
    }

    pub fn set_custom_color(&mut self, hex: &str) -> Result<Color, ColorError> {
        let color = self.toolbar.set_custom_color(hex)?;
        self.apply_toolbar_color(color);
        Ok(color)
    }

    fn apply_toolbar_color(&mut self, color: Color) {
        if self.unlocked {
            let outcome = self.session.set_drawing_color(color);
            self.route(outcome);
        }
    }

    pub fn toggle_lock(&mut self, id: ShapeId) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.toggle_lock(id);
        self.route(outcome)
    }

    pub fn delete_shape(&mut self, id: ShapeId) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.delete_shape(id);
        self.route(outcome)
    }

    pub fn set_description(&mut self, id: ShapeId, text: &str) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.set_description(id, text);
        self.route(outcome)
    }

    pub fn set_shape_color(&mut self, id: ShapeId, color: Color) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.set_color(id, color);
        self.route(outcome)
    }

    /// Selection from the shape list.
    pub fn select_shape(&mut self, id: Option<ShapeId>) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.set_active(id);
        self.route(outcome)
    }

    pub fn clear_annotations(&mut self) -> InteractionOutcome {
        if !self.unlocked {
            return InteractionOutcome::none();
        }
        let outcome = self.session.clear();
        self.route(outcome)
    }

    /// Shows or hides every annotation. Hidden annotations ignore pointer
    /// input; a gesture in progress is ended first.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        if !self.visible {
            let outcome = self.session.cancel_gesture();
            self.route(outcome);
        }
        self.frames.request();
        tracing::debug!(visible = self.visible, "Annotation visibility toggled");
        self.visible
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.view_changed();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.view_changed();
    }

    pub fn rotate_clockwise(&mut self) {
        self.viewport.rotate_clockwise();
        self.frames.request();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.frames.request();
    }

    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
        self.viewport.fit_image();
        self.view_changed();
    }

    /// Keeps pointer tolerances a fixed number of screen pixels.
    fn view_changed(&mut self) {
        let scale = self.viewport.screen_to_image_distance(1.0);
        self.session.set_pointer_scale(scale);
        self.frames.request();
    }

    /// Runs the saves that are due: an immediate flush after a drag, or the
    /// debounced save once its quiet window has passed. Returns true if a save
    /// reached the store.
    pub async fn tick(&mut self) -> bool {
        if std::mem::take(&mut self.flush_requested) {
            return self.adapter.flush(self.session.shapes()).await;
        }
        self.adapter.poll(Instant::now(), self.session.shapes()).await
    }

    /// Frame callback. Returns the display list when a redraw is pending.
    pub fn on_frame(&mut self) -> Option<DisplayList> {
        if !self.frames.take() {
            return None;
        }
        Some(self.display_list())
    }

    /// Draw commands for the current state, empty while locked.
    pub fn display_list(&self) -> DisplayList {
        if !self.unlocked {
            return DisplayList::default();
        }
        build_display_list(
            &self.session,
            RenderOptions {
                visible: self.visible,
                interactive: true,
            },
        )
    }

    /// Rasterizes the current display list at canvas size.
    pub fn rasterize(&self) -> Option<Pixmap> {
        let (w, h) = self.viewport.canvas_size();
        rasterize(
            &self.display_list(),
            &self.viewport,
            w.round().max(0.0) as u32,
            h.round().max(0.0) as u32,
        )
    }

    pub fn cursor(&self) -> Cursor {
        match self.session.hover() {
            Some(hover) if self.accepts_input() => cursor_for(&self.session, hover),
            _ => Cursor::Default,
        }
    }

    pub fn shape_list(&self) -> ShapeList {
        if !self.unlocked {
            return ShapeList::default();
        }
        ShapeList::from_session(&self.session)
    }

    /// Non-blocking "failed to save" notice, if the last attempt failed.
    pub fn save_notice(&self) -> Option<&PersistFailure> {
        self.adapter.last_failure()
    }

    pub fn dismiss_save_notice(&mut self) {
        self.adapter.clear_failure();
    }
}
