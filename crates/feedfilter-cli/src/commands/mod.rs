pub mod case_sensitive;
pub mod filter;
pub mod keywords;
pub mod replay;
pub mod stats;

use anyhow::{Context, Result};
use feedfilter_config::{SaveOutcome, SettingsEditor};
use std::path::Path;
use tracing::warn;

/// Shown when the settings store cannot be read or written.
pub const STORAGE_UNAVAILABLE: &str = "Storage not available!";

/// Read a UTF-8 input file.
pub(crate) async fn read_input(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `contents` to `output`, or to stdout when no path is given.
pub(crate) async fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", contents);
            Ok(())
        }
    }
}

/// Persist editor state. Storage failures are reported, not fatal.
pub(crate) async fn save(editor: &SettingsEditor) -> bool {
    match editor.save(None).await {
        SaveOutcome::Saved => true,
        SaveOutcome::StorageUnavailable(reason) => {
            warn!(%reason, "Settings not saved");
            eprintln!("{}", STORAGE_UNAVAILABLE);
            false
        }
    }
}
