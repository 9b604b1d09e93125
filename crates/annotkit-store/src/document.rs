use annotkit_engine::Shape;
use serde::{Deserialize, Serialize};

/// Everything persisted under one passkey. A save always replaces the whole
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDocument {
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub annotations: Vec<Shape>,
}

impl AnnotationDocument {
    pub fn new(image_name: impl Into<String>, image_url: impl Into<String>, annotations: Vec<Shape>) -> Self {
        Self {
            image_name: image_name.into(),
            image_url: image_url.into(),
            annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotkit_engine::{Circle, Geometry, Point, PALETTE};

    #[test]
    fn test_wire_format() {
        let doc = AnnotationDocument::new(
            "scan.png",
            "https://example.org/scan.png",
            vec![Shape::new(
                1,
                PALETTE[0],
                Geometry::Circle(Circle::new(Point::new(10.0, 20.0), 30.0)),
            )],
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["imageName"], "scan.png");
        assert_eq!(value["imageUrl"], "https://example.org/scan.png");
        assert_eq!(value["annotations"][0]["type"], "circle");
        assert_eq!(value["annotations"][0]["x"], 10.0);

        let back: AnnotationDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_missing_fields_default() {
        let doc: AnnotationDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.annotations.is_empty());
        assert!(doc.image_name.is_empty());
    }
}
