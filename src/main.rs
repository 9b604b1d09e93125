use std::path::PathBuf;
use std::sync::Arc;

use annotkit::replay::{self, ReplayScript};
use annotkit::{init_logging, Config, FileStore, Passkey, Viewer, BUILD_DATE, VERSION};
use anyhow::{bail, Context};

const USAGE: &str = "\
Usage:
  annotkit passkey                          Print a fresh passkey
  annotkit replay <script.json> [config]    Replay an event script against the file store
  annotkit version                          Print version information";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("passkey") => {
            println!("{}", Passkey::generate());
        }
        Some("replay") => {
            let Some(script_path) = args.get(2) else {
                bail!("missing script path\n\n{}", USAGE);
            };
            let config_path = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(Config::default_path);
            replay_file(PathBuf::from(script_path), config_path).await?;
        }
        Some("version") => {
            println!("annotkit {} (built {})", VERSION, BUILD_DATE);
        }
        _ => {
            println!("{}", USAGE);
        }
    }

    Ok(())
}

async fn replay_file(script_path: PathBuf, config_path: PathBuf) -> anyhow::Result<()> {
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let text = tokio::fs::read_to_string(&script_path)
        .await
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let script = ReplayScript::from_json(&text)?;

    tracing::info!(
        store = %config.persistence.store_dir.display(),
        events = script.events.len(),
        "Replaying script"
    );

    let store = Arc::new(FileStore::new(config.persistence.store_dir.clone()));
    let mut viewer = Viewer::from_config(&config, store, script.image.clone().into())?;
    let report = replay::run(&mut viewer, &script).await?;
    print!("{}", report);
    Ok(())
}
