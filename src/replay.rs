//! Event-script replay.
//!
//! Drives a [`Viewer`] from a JSON script of user actions, the way a GUI
//! would, and reports the resulting collection. Used by the command line
//! binary and handy for reproducing interaction bugs.
//!
//! ```json
//! {
//!   "passkey": "AB12cd34EF56",
//!   "image": { "name": "scan.png", "url": "", "width": 800, "height": 600 },
//!   "events": [
//!     { "op": "tool", "tool": "circle" },
//!     { "op": "down", "x": 100, "y": 100 },
//!     { "op": "describe", "index": 0, "text": "lesion" },
//!     { "op": "wait", "ms": 1200 }
//!   ]
//! }
//! ```

use std::time::Duration;

use annotkit_engine::{Point, ShapeId, ShapeKind};
use annotkit_viewer::{ImageInfo, ShapeListEntry, Viewer};
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptImage {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub width: f64,
    pub height: f64,
}

impl From<ScriptImage> for ImageInfo {
    fn from(image: ScriptImage) -> Self {
        ImageInfo::new(image.name, image.url, image.width, image.height)
    }
}

/// One recorded user action. Pointer coordinates are in screen space; shapes
/// are addressed by their position in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ReplayEvent {
    Tool { tool: Option<ShapeKind> },
    Palette { index: usize },
    CustomColor { hex: String },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Select { index: Option<usize> },
    Lock { index: usize },
    Delete { index: usize },
    Describe { index: usize, text: String },
    ToggleVisibility,
    Zoom { steps: i32 },
    Rotate,
    Wait { ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub passkey: String,
    pub image: ScriptImage,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid replay script")
    }
}

/// What a replay produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub events: usize,
    pub saves: u64,
    pub frames: u64,
    pub shapes: Vec<ShapeListEntry>,
    pub save_failed: bool,
}

impl std::fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} events, {} saves, {} frames",
            self.events, self.saves, self.frames
        )?;
        for entry in &self.shapes {
            write!(f, "{} [{}]", entry.label, entry.color.to_hex())?;
            if entry.locked {
                write!(f, " locked")?;
            }
            if let Some(measurement) = &entry.measurement {
                write!(f, " {}", measurement)?;
            }
            if !entry.description.is_empty() {
                write!(f, " \"{}\"", entry.description)?;
            }
            writeln!(f)?;
        }
        if self.save_failed {
            writeln!(f, "warning: the last save failed")?;
        }
        Ok(())
    }
}

fn shape_at(viewer: &Viewer, index: usize) -> anyhow::Result<ShapeId> {
    viewer
        .session()
        .shapes()
        .get(index)
        .map(|s| s.id)
        .with_context(|| format!("No shape at index {}", index))
}

/// Applies one event. Waits advance the tokio clock, so debounced saves fire
/// as they would in real time.
async fn apply(viewer: &mut Viewer, event: &ReplayEvent) -> anyhow::Result<()> {
    match event {
        ReplayEvent::Tool { tool } => {
            viewer.select_tool(*tool);
        }
        ReplayEvent::Palette { index } => {
            viewer
                .select_palette(*index)
                .with_context(|| format!("No palette color at index {}", index))?;
        }
        ReplayEvent::CustomColor { hex } => {
            viewer.set_custom_color(hex)?;
        }
        ReplayEvent::Down { x, y } => {
            viewer.pointer_down(Point::new(*x, *y));
        }
        ReplayEvent::Move { x, y } => {
            viewer.pointer_move(Point::new(*x, *y));
        }
        ReplayEvent::Up { x, y } => {
            viewer.pointer_up(Point::new(*x, *y));
        }
        ReplayEvent::Select { index } => {
            let id = index.map(|i| shape_at(viewer, i)).transpose()?;
            viewer.select_shape(id);
        }
        ReplayEvent::Lock { index } => {
            let id = shape_at(viewer, *index)?;
            viewer.toggle_lock(id);
        }
        ReplayEvent::Delete { index } => {
            let id = shape_at(viewer, *index)?;
            viewer.delete_shape(id);
        }
        ReplayEvent::Describe { index, text } => {
            let id = shape_at(viewer, *index)?;
            viewer.set_description(id, text);
        }
        ReplayEvent::ToggleVisibility => {
            viewer.toggle_visibility();
        }
        ReplayEvent::Zoom { steps } => {
            for _ in 0..steps.unsigned_abs() {
                if *steps > 0 {
                    viewer.zoom_in();
                } else {
                    viewer.zoom_out();
                }
            }
        }
        ReplayEvent::Rotate => viewer.rotate_clockwise(),
        ReplayEvent::Wait { ms } => {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
    }
    Ok(())
}

/// Unlocks `viewer` with the script's passkey, replays every event, then
/// closes the viewer so pending edits are saved.
pub async fn run(viewer: &mut Viewer, script: &ReplayScript) -> anyhow::Result<ReplayReport> {
    viewer
        .unlock(&script.passkey)
        .await
        .context("Passkey rejected")?;

    let mut frames = 0;
    for (i, event) in script.events.iter().enumerate() {
        apply(viewer, event)
            .await
            .with_context(|| format!("Event {} ({:?}) failed", i, event))?;
        viewer.tick().await;
        if viewer.on_frame().is_some() {
            frames += 1;
        }
    }

    let shapes = viewer.shape_list().entries().to_vec();
    let save_failed = viewer.save_notice().is_some();
    viewer.close().await;
    tracing::info!(events = script.events.len(), shapes = shapes.len(), "Replay finished");

    Ok(ReplayReport {
        events: script.events.len(),
        saves: viewer.adapter().save_count(),
        frames,
        shapes,
        save_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = ReplayScript::from_json(
            r##"{
                "passkey": "AB12cd34EF56",
                "image": { "name": "scan.png", "width": 800, "height": 600 },
                "events": [
                    { "op": "tool", "tool": "bidirectional" },
                    { "op": "tool", "tool": null },
                    { "op": "down", "x": 1, "y": 2 },
                    { "op": "customColor", "hex": "#00ff00" },
                    { "op": "toggleVisibility" },
                    { "op": "select", "index": null }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(script.events.len(), 6);
        assert_eq!(
            script.events[0],
            ReplayEvent::Tool {
                tool: Some(ShapeKind::Bidirectional)
            }
        );
        assert_eq!(script.events[4], ReplayEvent::ToggleVisibility);
        assert!(script.image.url.is_empty());
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let err = ReplayScript::from_json(
            r#"{ "passkey": "x", "image": { "name": "a", "width": 1, "height": 1 },
                 "events": [{ "op": "explode" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid replay script"));
    }
}
