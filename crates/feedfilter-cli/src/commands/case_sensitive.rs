use crate::commands::save;
use crate::config::CliConfig;
use anyhow::Result;
use feedfilter_config::SettingsEditor;

pub async fn execute(config: CliConfig, enabled: bool) -> Result<()> {
    let mut editor = SettingsEditor::open(config.store()).await;
    editor.set_case_sensitive(enabled);

    if save(&editor).await {
        let state = if enabled { "on" } else { "off" };
        println!("Case-sensitive matching {}", state);
    }
    Ok(())
}
