//! Processing pipeline.
//!
//! [`PostFilter`] ties the pieces together: locate posts, extract their
//! text, match keywords, hide on match. Every post is evaluated at most
//! once per settings generation; the ledger is cleared only by
//! [`PostFilter::reset_and_reprocess`].
//!
//! Ledger membership ("already evaluated") and the hidden marker on the
//! node ("currently hidden") are separate questions. A reset reveals every
//! marked node found by a document scan, not just ledgered ones.

use crate::dom::{Document, NodeId};
use crate::engine::HideShowEngine;
use crate::error::Result;
use crate::extractor::TextExtractor;
use crate::locator::PostLocator;
use crate::matcher;
use feedfilter_config::{load_settings, FilterSettings, RulesConfig, Settings, SettingsStore};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of [`PostFilter::process_post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// The post was evaluated earlier in this generation.
    AlreadyProcessed,
    /// Evaluated, no keyword matched.
    Shown,
    /// Evaluated and hidden.
    Hidden,
}

/// Summary of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Posts the locator returned.
    pub located: usize,
    /// Posts evaluated for the first time.
    pub evaluated: usize,
    /// Posts hidden by this pass.
    pub hidden: usize,
}

impl PassReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: PassReport) {
        self.located += other.located;
        self.evaluated += other.evaluated;
        self.hidden += other.hidden;
    }

    fn record(&mut self, outcome: PostOutcome) {
        match outcome {
            PostOutcome::AlreadyProcessed => {}
            PostOutcome::Shown => self.evaluated += 1,
            PostOutcome::Hidden => {
                self.evaluated += 1;
                self.hidden += 1;
            }
        }
    }
}

/// What happened to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A reveal button was clicked; the post was revealed and the click
    /// must not reach the host page.
    Consumed,
    /// Not ours.
    PassThrough,
}

/// Keyword filter for one page session.
pub struct PostFilter {
    settings: FilterSettings,
    ledger: HashSet<NodeId>,
    locator: PostLocator,
    extractor: TextExtractor,
    engine: HideShowEngine,
}

impl PostFilter {
    /// Load settings from `store` and build a filter.
    ///
    /// Loading never fails; an unavailable store yields defaults.
    pub async fn start(store: Arc<dyn SettingsStore>, rules: &RulesConfig) -> Result<Self> {
        let settings = load_settings(store.as_ref()).await;
        info!(
            keywords = settings.filter.keywords.len(),
            case_sensitive = settings.filter.case_sensitive,
            hidden_count = settings.hidden_count,
            "Settings loaded"
        );
        Self::new(settings, store, rules)
    }

    /// Build a filter from already-loaded settings.
    pub fn new(settings: Settings, store: Arc<dyn SettingsStore>, rules: &RulesConfig) -> Result<Self> {
        Ok(Self {
            settings: settings.filter,
            ledger: HashSet::new(),
            locator: PostLocator::from_rules(rules)?,
            extractor: TextExtractor::from_rules(rules)?,
            engine: HideShowEngine::new(store, settings.hidden_count, rules)?,
        })
    }

    /// Active keyword settings.
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Current hidden-post counter.
    pub fn hidden_count(&self) -> u64 {
        self.engine.hidden_count()
    }

    /// Whether `post` has been evaluated in this generation.
    pub fn is_processed(&self, post: NodeId) -> bool {
        self.ledger.contains(&post)
    }

    /// Number of posts evaluated in this generation.
    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }

    /// The post locator in use.
    pub fn locator(&self) -> &PostLocator {
        &self.locator
    }

    /// The hide/show engine in use.
    pub fn engine(&self) -> &HideShowEngine {
        &self.engine
    }

    /// Evaluate one post.
    pub async fn process_post(&mut self, doc: &mut Document, post: NodeId) -> Result<PostOutcome> {
        if !self.ledger.insert(post) {
            return Ok(PostOutcome::AlreadyProcessed);
        }

        let text = self.extractor.extract(doc, post);
        let hit = matcher::first_match(&text, &self.settings.keywords, self.settings.case_sensitive);
        match hit {
            Some(keyword) => {
                debug!(%post, keyword, "Keyword matched");
                self.engine.hide(doc, post).await?;
                Ok(PostOutcome::Hidden)
            }
            None => {
                debug!(%post, "No keyword matched");
                Ok(PostOutcome::Shown)
            }
        }
    }

    /// Evaluate every post in the document.
    pub async fn full_pass(&mut self, doc: &mut Document) -> Result<PassReport> {
        let posts = self.locator.locate_all(doc);
        let report = self.process_all(doc, &posts).await?;
        info!(
            located = report.located,
            evaluated = report.evaluated,
            hidden = report.hidden,
            hidden_count = self.hidden_count(),
            "Full pass complete"
        );
        Ok(report)
    }

    /// Evaluate posts at or under a newly inserted node.
    pub async fn incremental_pass(&mut self, doc: &mut Document, node: NodeId) -> Result<PassReport> {
        let posts = self.locator.locate_within(doc, node);
        let report = self.process_all(doc, &posts).await?;
        if report.evaluated > 0 {
            debug!(
                %node,
                evaluated = report.evaluated,
                hidden = report.hidden,
                "Incremental pass complete"
            );
        }
        Ok(report)
    }

    /// Replace the settings and start a new generation.
    ///
    /// Every node carrying the hidden marker is revealed (each reveal
    /// decrements the counter), the ledger is cleared, then a full pass runs.
    pub async fn reset_and_reprocess(
        &mut self,
        doc: &mut Document,
        settings: FilterSettings,
    ) -> Result<PassReport> {
        info!(
            keywords = settings.keywords.len(),
            case_sensitive = settings.case_sensitive,
            "Settings updated, reprocessing"
        );
        self.settings = settings;
        self.ledger.clear();

        let hidden = self.engine.hidden_posts(doc);
        debug!(count = hidden.len(), "Revealing hidden posts");
        for post in hidden {
            self.engine.reveal(doc, post).await;
        }

        self.full_pass(doc).await
    }

    /// Route a click. Reveal buttons reveal their post and consume the click.
    pub async fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> ClickOutcome {
        match self.engine.reveal_target(doc, target) {
            Some(post) => {
                self.engine.reveal(doc, post).await;
                info!(%post, hidden_count = self.hidden_count(), "Post revealed by click");
                ClickOutcome::Consumed
            }
            None => ClickOutcome::PassThrough,
        }
    }

    async fn process_all(&mut self, doc: &mut Document, posts: &[NodeId]) -> Result<PassReport> {
        let mut report = PassReport {
            located: posts.len(),
            ..PassReport::default()
        };
        for &post in posts {
            let outcome = self.process_post(doc, post).await?;
            report.record(outcome);
        }
        Ok(report)
    }
}
