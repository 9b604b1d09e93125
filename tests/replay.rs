use std::sync::Arc;

use annotkit::replay::{self, ReplayScript};
use annotkit::{AnnotationStore, Config, FileStore, Geometry, MemoryStore, Passkey, Viewer};

const KEY: &str = "AB12cd34EF56";

fn script(events: &str) -> ReplayScript {
    ReplayScript::from_json(&format!(
        r#"{{
            "passkey": "{KEY}",
            "image": {{ "name": "scan.png", "url": "file:///scan.png", "width": 800, "height": 600 }},
            "events": {events}
        }}"#
    ))
    .unwrap()
}

fn fast_config(store_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.persistence.debounce_ms = 20;
    config.persistence.store_dir = store_dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_replay_writes_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path());
    let store = Arc::new(FileStore::new(config.persistence.store_dir.clone()));
    let script = script(
        r#"[
            { "op": "tool", "tool": "circle" },
            { "op": "down", "x": 100, "y": 100 },
            { "op": "down", "x": 150, "y": 100 },
            { "op": "move", "x": 170, "y": 100 },
            { "op": "up", "x": 170, "y": 100 },
            { "op": "describe", "index": 0, "text": "lesion" },
            { "op": "wait", "ms": 60 }
        ]"#,
    );

    let mut viewer = Viewer::from_config(&config, store.clone(), script.image.clone().into()).unwrap();
    let report = replay::run(&mut viewer, &script).await.unwrap();

    assert_eq!(report.events, 7);
    // one flush on release, one debounced save for the description
    assert_eq!(report.saves, 2);
    assert!(report.frames > 0);
    assert!(!report.save_failed);
    assert_eq!(report.shapes.len(), 1);
    assert_eq!(report.shapes[0].label, "Circle 1");
    assert_eq!(report.shapes[0].description, "lesion");
    assert_eq!(
        report.shapes[0].measurement.as_deref(),
        Some("Area: 15393.80 px²")
    );
    assert!(report.to_string().contains("\"lesion\""));

    let passkey = Passkey::parse(KEY).unwrap();
    assert!(store.path_for(&passkey).exists());
    let doc = store.load(&passkey).await.unwrap().unwrap();
    assert_eq!(doc.image_url, "file:///scan.png");
    match &doc.annotations[0].geometry {
        Geometry::Circle(c) => assert_eq!(c.radius, 70.0),
        other => panic!("expected circle, got {other:?}"),
    }
}

#[tokio::test]
async fn test_replay_flushes_pending_edits_on_close() {
    let store = Arc::new(MemoryStore::new());
    let script = script(
        r#"[
            { "op": "palette", "index": 1 },
            { "op": "tool", "tool": "rectangle" },
            { "op": "down", "x": 300, "y": 300 },
            { "op": "lock", "index": 0 }
        ]"#,
    );

    let mut viewer =
        Viewer::from_config(&Config::default(), store.clone(), script.image.clone().into())
            .unwrap();
    let report = replay::run(&mut viewer, &script).await.unwrap();

    assert_eq!(report.saves, 1);
    assert!(report.shapes[0].locked);
    assert!(!viewer.is_unlocked());

    let doc = store
        .load(&Passkey::parse(KEY).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(doc.annotations[0].locked);
}

#[tokio::test]
async fn test_replay_reports_bad_shape_index() {
    let store = Arc::new(MemoryStore::new());
    let script = script(r#"[{ "op": "delete", "index": 3 }]"#);
    let mut viewer =
        Viewer::from_config(&Config::default(), store, script.image.clone().into()).unwrap();

    let err = replay::run(&mut viewer, &script).await.unwrap_err();
    assert!(format!("{err:#}").contains("No shape at index 3"));
}

#[tokio::test]
async fn test_replay_rejects_invalid_passkey() {
    let mut script = script("[]");
    script.passkey = "nope".to_string();
    let mut viewer = Viewer::from_config(
        &Config::default(),
        Arc::new(MemoryStore::new()),
        script.image.clone().into(),
    )
    .unwrap();

    let err = replay::run(&mut viewer, &script).await.unwrap_err();
    assert!(err.to_string().contains("Passkey rejected"));
}
