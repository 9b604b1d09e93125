use annotkit_engine::{measurement_label, AnnotationSession, Color, ShapeId, ShapeKind};

/// Row of the shape list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeListEntry {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// e.g. `Circle 2`, numbered per kind in creation order
    pub label: String,
    pub color: Color,
    pub locked: bool,
    pub description: String,
    pub measurement: Option<String>,
    pub active: bool,
}

/// Snapshot of the collection for the side list, in z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeList {
    entries: Vec<ShapeListEntry>,
}

impl ShapeList {
    pub fn from_session(session: &AnnotationSession) -> Self {
        let precision = session.config().label_precision;
        let mut counts = [0usize; ShapeKind::ALL.len()];
        let entries = session
            .shapes()
            .iter()
            .map(|shape| {
                let kind = shape.kind();
                let slot = ShapeKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
                counts[slot] += 1;
                ShapeListEntry {
                    id: shape.id,
                    kind,
                    label: format!("{} {}", kind.label(), counts[slot]),
                    color: shape.color,
                    locked: shape.locked,
                    description: shape.description.clone(),
                    measurement: measurement_label(shape, precision),
                    active: session.active_id() == Some(shape.id),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ShapeListEntry] {
        &self.entries
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeListEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotkit_engine::{EngineConfig, Point, PALETTE};

    #[test]
    fn test_entries_follow_collection() {
        let mut s = AnnotationSession::new(EngineConfig::default());
        for (kind, x) in [
            (ShapeKind::Circle, 100.0),
            (ShapeKind::Rectangle, 300.0),
            (ShapeKind::Circle, 500.0),
        ] {
            s.select_tool(Some(kind), PALETTE[1]);
            s.pointer_down(Point::new(x, 100.0));
        }
        let first = s.shapes()[0].id;
        s.set_description(first, "left");
        s.toggle_lock(first);

        let list = ShapeList::from_session(&s);
        let labels: Vec<&str> = list.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Circle 1", "Rectangle 1", "Circle 2"]);

        let entry = list.get(first).unwrap();
        assert!(entry.locked);
        assert_eq!(entry.description, "left");
        assert_eq!(entry.measurement.as_deref(), Some("Area: 7853.98 px²"));
        assert!(list.entries()[2].active);
        assert!(!entry.active);
    }
}
