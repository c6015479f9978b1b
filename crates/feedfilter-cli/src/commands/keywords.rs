use crate::cli::KeywordCommands;
use crate::commands::save;
use crate::config::CliConfig;
use anyhow::Result;
use feedfilter_config::SettingsEditor;

pub async fn execute(config: CliConfig, command: KeywordCommands) -> Result<()> {
    let mut editor = SettingsEditor::open(config.store()).await;

    match command {
        KeywordCommands::List => {
            if editor.keywords().is_empty() {
                println!("No keywords configured");
            }
            for (i, keyword) in editor.keywords().iter().enumerate() {
                println!("{:>3}. {}", i + 1, keyword);
            }
        }
        KeywordCommands::Add { keyword } => {
            if !editor.add_keyword(&keyword) {
                println!("Keyword '{}' is blank or already present", keyword.trim());
                return Ok(());
            }
            if save(&editor).await {
                println!("Added '{}'", keyword.trim());
            }
        }
        KeywordCommands::Remove { keyword } => {
            if !editor.remove_keyword(&keyword) {
                println!("Keyword '{}' not found", keyword);
                return Ok(());
            }
            if save(&editor).await {
                println!("Removed '{}'", keyword);
            }
        }
    }

    Ok(())
}
