use crate::commands::{read_input, write_output};
use crate::config::CliConfig;
use anyhow::{Context, Result};
use feedfilter_config::ControlMessage;
use feedfilter_core::{Document, PassReport};
use feedfilter_watch::{channel, FeedEvent, FeedSession, RenderTarget};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON output of `feedfilter replay --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    /// Pass over the initial page.
    pub initial: PassReport,
    /// Events replayed after the initial page.
    pub events: usize,
    /// Posts evaluated since the last settings update.
    pub evaluated: usize,
    /// Posts currently carrying the hidden marker.
    pub hidden_posts: usize,
    /// Persisted hidden-post counter.
    pub hidden_count: u64,
}

pub async fn execute(
    config: CliConfig,
    initial: PathBuf,
    chunks: Vec<PathBuf>,
    into: Option<String>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let page = read_input(&initial).await?;
    let target = into.map(RenderTarget::Selector).unwrap_or(RenderTarget::Body);

    let mut events = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        events.push(load_event(chunk, &target).await?);
    }

    let (html, summary) = replay(&config, &page, events).await?;
    info!(
        events = summary.events,
        hidden_posts = summary.hidden_posts,
        "Replay complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        if let Some(path) = output.as_deref() {
            write_output(Some(path), &html).await?;
        }
    } else {
        write_output(output.as_deref(), &html).await?;
    }

    Ok(())
}

/// Start a session on `page`, feed it `events` through the service, and
/// return the final markup.
pub async fn replay(
    config: &CliConfig,
    page: &str,
    events: Vec<FeedEvent>,
) -> Result<(String, ReplaySummary)> {
    let session = FeedSession::start(Document::parse_html(page), config.store(), config.rules())
        .await
        .context("Failed to start feed session")?;
    let initial = session.initial_report();

    let (service, handle) = channel(session);
    let task = tokio::spawn(service.run());

    let count = events.len();
    for event in events {
        debug!(kind = event.kind(), "Replaying event");
        handle.send(event)?;
    }
    drop(handle);

    let session = task.await.context("Feed service task failed")?;
    let summary = ReplaySummary {
        initial,
        events: count,
        evaluated: session.filter().ledger_len(),
        hidden_posts: session.filter().engine().hidden_posts(session.document()).len(),
        hidden_count: session.filter().hidden_count(),
    };
    Ok((session.into_document().to_html(), summary))
}

async fn load_event(path: &Path, target: &RenderTarget) -> Result<FeedEvent> {
    let contents = read_input(path).await?;
    if path.extension().is_some_and(|ext| ext == "json") {
        let message: ControlMessage = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid control message in {}", path.display()))?;
        return Ok(FeedEvent::Control(message));
    }
    Ok(FeedEvent::Render {
        parent: target.clone(),
        html: contents,
    })
}
