//! A single page session: one document and one filter.

use crate::error::{Error, Result};
use crate::events::{EventOutcome, FeedEvent, RenderTarget};
use feedfilter_config::{ControlMessage, RulesConfig, SettingsStore};
use feedfilter_core::{
    ClickOutcome, Document, MutationRecord, NodeId, PassReport, PostFilter, Selector,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the document and the filter for the lifetime of a page.
///
/// Settings are loaded and the initial full pass has run before a session
/// exists, so no event can be processed against unloaded settings.
pub struct FeedSession {
    document: Document,
    filter: PostFilter,
    initial_report: PassReport,
}

impl FeedSession {
    /// Load settings, run the initial full pass, then start observing
    /// insertions.
    pub async fn start(
        mut document: Document,
        store: Arc<dyn SettingsStore>,
        rules: &RulesConfig,
    ) -> Result<Self> {
        let mut filter = PostFilter::start(store, rules).await?;
        let initial_report = filter.full_pass(&mut document).await?;
        document.observe();
        info!(
            posts = initial_report.located,
            hidden = initial_report.hidden,
            "Feed session started"
        );

        Ok(Self {
            document,
            filter,
            initial_report,
        })
    }

    /// Report of the pass run at startup.
    pub fn initial_report(&self) -> PassReport {
        self.initial_report
    }

    /// The session's document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The session's filter.
    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Consume the session, keeping the filtered document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Edit the document directly. Insertions are picked up by the next
    /// [`flush_mutations`](Self::flush_mutations).
    pub fn mutate<R>(&mut self, edit: impl FnOnce(&mut Document) -> R) -> R {
        edit(&mut self.document)
    }

    /// Process one event.
    pub async fn dispatch(&mut self, event: FeedEvent) -> Result<EventOutcome> {
        match event {
            FeedEvent::Render { parent, html } => self.render(&parent, &html).await,
            FeedEvent::Mutations(records) => {
                let mut report = self.process_records(records).await?;
                report.merge(self.flush_mutations().await?);
                Ok(EventOutcome::Processed(report))
            }
            FeedEvent::Control(message) => self.apply_control(message).await.map(EventOutcome::Reset),
            FeedEvent::Click(target) => Ok(EventOutcome::Click(self.click(target).await)),
        }
    }

    /// Append `html` under `parent` and filter what was inserted.
    pub async fn render(&mut self, parent: &RenderTarget, html: &str) -> Result<EventOutcome> {
        let parent_id = self.resolve(parent)?;
        let added = self.document.append_html(parent_id, html)?;
        debug!(parent = %parent, added = added.len(), "Rendered fragment");

        let report = self.flush_mutations().await?;
        Ok(EventOutcome::Rendered {
            added: added.len(),
            report,
        })
    }

    /// Run incremental passes for every pending insertion.
    ///
    /// Hiding a post inserts its reveal control, which is itself observed.
    /// Those records are drained in the same call; they never contain posts.
    pub async fn flush_mutations(&mut self) -> Result<PassReport> {
        let mut report = PassReport::default();
        loop {
            let records = self.document.take_records();
            if records.is_empty() {
                break;
            }
            report.merge(self.process_records(records).await?);
        }
        Ok(report)
    }

    /// Apply an `updateSettings` message: reveal everything and reprocess.
    pub async fn apply_control(&mut self, message: ControlMessage) -> Result<PassReport> {
        let settings = message.filter_settings();
        let report = self
            .filter
            .reset_and_reprocess(&mut self.document, settings)
            .await?;
        // Reveal controls re-inserted by the reprocess
        self.flush_mutations().await?;
        Ok(report)
    }

    /// Route a click to the filter.
    pub async fn click(&mut self, target: NodeId) -> ClickOutcome {
        if !self.document.contains_node(target) {
            return ClickOutcome::PassThrough;
        }
        self.filter.handle_click(&mut self.document, target).await
    }

    async fn process_records(&mut self, records: Vec<MutationRecord>) -> Result<PassReport> {
        let mut report = PassReport::default();
        for record in records {
            for node in record.added {
                if !self.document.contains_node(node) {
                    continue;
                }
                report.merge(self.filter.incremental_pass(&mut self.document, node).await?);
            }
        }
        Ok(report)
    }

    fn resolve(&self, target: &RenderTarget) -> Result<NodeId> {
        match target {
            RenderTarget::Body => Ok(self.document.body()),
            RenderTarget::Node(id) if self.document.contains_node(*id) => Ok(*id),
            RenderTarget::Node(_) => Err(Error::TargetNotFound(target.to_string())),
            RenderTarget::Selector(source) => {
                let selector = Selector::parse(source).map_err(feedfilter_core::Error::from)?;
                self.document
                    .select_first(self.document.root(), &selector)
                    .ok_or_else(|| Error::TargetNotFound(source.clone()))
            }
        }
    }
}
