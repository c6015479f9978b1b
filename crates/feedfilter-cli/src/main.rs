use anyhow::Result;
use clap::Parser;

use feedfilter_cli::{
    cli::{Cli, Commands},
    commands, config, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.level_filter());

    let config = config::CliConfig::load(cli.config, cli.settings)?;

    match cli.command {
        Commands::Filter {
            input,
            output,
            json,
        } => commands::filter::execute(config, input, output, json).await?,

        Commands::Replay {
            initial,
            chunks,
            into,
            output,
            json,
        } => commands::replay::execute(config, initial, chunks, into, output, json).await?,

        Commands::Keywords(cmd) => commands::keywords::execute(config, cmd).await?,

        Commands::CaseSensitive { enabled } => {
            commands::case_sensitive::execute(config, enabled).await?
        }

        Commands::Stats => commands::stats::execute(config).await?,
    }

    Ok(())
}
