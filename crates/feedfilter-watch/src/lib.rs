//! # feedfilter Feed Session
//!
//! Runs the filter against a live document. All input arrives as
//! [`FeedEvent`]s through one channel and is handled by a single consumer:
//!
//! ```text
//! ┌─────────────┐  FeedEvent   ┌──────────────┐        ┌─────────────┐
//! │ FeedHandle  │─────────────▶│ FeedService  │───────▶│ FeedSession │
//! │ (host page, │   (mpsc)     │  run() loop  │        │ Document +  │
//! │  editor)    │              └──────────────┘        │ PostFilter  │
//! └─────────────┘                                      └─────────────┘
//! ```
//!
//! The session does no work between events. A handle doubles as the
//! [`SettingsNotifier`](feedfilter_config::SettingsNotifier) for the settings
//! editor; once the service stops, notifications fail with `NoListener`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
mod events;
mod service;
mod session;

pub use error::{Error, Result};
pub use events::{EventOutcome, FeedEvent, RenderTarget};
pub use service::{channel, FeedHandle, FeedService};
pub use session::FeedSession;
