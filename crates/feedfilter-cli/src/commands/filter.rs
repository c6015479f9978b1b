use crate::commands::{read_input, write_output};
use crate::config::CliConfig;
use anyhow::{Context, Result};
use feedfilter_core::{Document, PassReport};
use feedfilter_watch::FeedSession;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// JSON output of `feedfilter filter --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    pub report: PassReport,
    pub hidden_count: u64,
}

pub async fn execute(
    config: CliConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let html = read_input(&input).await?;
    let (filtered, summary) = filter_html(&config, &html).await?;
    info!(
        input = %input.display(),
        located = summary.report.located,
        hidden = summary.report.hidden,
        "Filtered snapshot"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        if let Some(path) = output.as_deref() {
            write_output(Some(path), &filtered).await?;
        }
    } else {
        write_output(output.as_deref(), &filtered).await?;
        if output.is_some() {
            println!(
                "{} posts, {} hidden",
                summary.report.located, summary.report.hidden
            );
        }
    }

    Ok(())
}

/// Run a full pass over `html` and return the annotated markup.
pub async fn filter_html(config: &CliConfig, html: &str) -> Result<(String, FilterSummary)> {
    let session = FeedSession::start(Document::parse_html(html), config.store(), config.rules())
        .await
        .context("Failed to start feed session")?;

    let summary = FilterSummary {
        report: session.initial_report(),
        hidden_count: session.filter().hidden_count(),
    };
    Ok((session.into_document().to_html(), summary))
}
