use crate::commands::STORAGE_UNAVAILABLE;
use crate::config::CliConfig;
use anyhow::Result;
use feedfilter_config::{SettingsEditor, SettingsStore};
use std::sync::Arc;
use tracing::warn;

pub async fn execute(config: CliConfig) -> Result<()> {
    let store = config.store();
    if let Err(e) = store.load().await {
        warn!(error = %e, "Cannot read settings");
        eprintln!("{}", STORAGE_UNAVAILABLE);
        return Ok(());
    }

    let store: Arc<dyn SettingsStore> = store;
    let editor = SettingsEditor::open(store).await;
    println!("{}", editor.stats_line());
    println!("Settings: {}", config.settings_path().display());
    Ok(())
}
