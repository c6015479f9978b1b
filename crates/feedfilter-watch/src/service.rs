//! Channel-driven event loop around a [`FeedSession`].

use crate::error::{Error, Result};
use crate::events::{FeedEvent, RenderTarget};
use crate::session::FeedSession;
use feedfilter_config::{ControlMessage, NotifyError, SettingsNotifier};
use feedfilter_core::NodeId;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Create a service for `session` and the first handle feeding it.
pub fn channel(session: FeedSession) -> (FeedService, FeedHandle) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (FeedService { session, receiver }, FeedHandle { sender })
}

/// Single consumer of feed events.
///
/// Events are processed one at a time in arrival order, so a click and a
/// mutation batch never interleave.
pub struct FeedService {
    session: FeedSession,
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
}

impl FeedService {
    /// Process events until every [`FeedHandle`] is dropped, then return
    /// the session.
    ///
    /// A failing event is logged and the loop carries on.
    pub async fn run(mut self) -> FeedSession {
        let mut processed = 0usize;
        while let Some(event) = self.receiver.recv().await {
            let kind = event.kind();
            match self.session.dispatch(event).await {
                Ok(outcome) => debug!(kind, ?outcome, "Event processed"),
                Err(e) => error!(kind, error = %e, "Error processing event"),
            }
            processed += 1;
        }
        info!(
            events = processed,
            hidden_count = self.session.filter().hidden_count(),
            "Feed service stopped"
        );
        self.session
    }
}

/// Cloneable sender side of a [`FeedService`].
#[derive(Clone)]
pub struct FeedHandle {
    sender: mpsc::UnboundedSender<FeedEvent>,
}

impl FeedHandle {
    /// Queue an event.
    pub fn send(&self, event: FeedEvent) -> Result<()> {
        self.sender.send(event).map_err(|_| Error::ChannelClosed)
    }

    /// Queue a render of `html` under `parent`.
    pub fn render(&self, parent: RenderTarget, html: impl Into<String>) -> Result<()> {
        self.send(FeedEvent::Render {
            parent,
            html: html.into(),
        })
    }

    /// Queue a click on `target`.
    pub fn click(&self, target: NodeId) -> Result<()> {
        self.send(FeedEvent::Click(target))
    }

    /// Whether the service has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl SettingsNotifier for FeedHandle {
    fn notify(&self, message: ControlMessage) -> std::result::Result<(), NotifyError> {
        self.sender
            .send(FeedEvent::Control(message))
            .map_err(|_| NotifyError::NoListener)
    }
}
