//! # feedfilter Configuration Library
//!
//! The foundation layer of the feedfilter workspace. It owns everything the
//! filter core reads but does not compute:
//!
//! - **Settings**: the keyword list, the case-sensitivity flag and the
//!   hidden-post counter, with the seed defaults used on first run
//! - **Settings storage**: the async [`SettingsStore`] seam plus an in-memory
//!   and a TOML-file implementation
//! - **Filter rules**: the selector vocabulary used to find posts and the
//!   text that carries their content, loaded from `config.toml`
//! - **Control messages**: the `updateSettings` message and the
//!   [`SettingsNotifier`] seam used to deliver it to a running filter
//! - **Settings editor**: the headless configuration surface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use feedfilter_config::{load_settings, FileSettingsStore, FilterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FilterConfig::load(None)?;
//!     let store = FileSettingsStore::new(config.settings_path());
//!     let settings = load_settings(&store).await;
//!     println!("{} keywords", settings.filter.keywords.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod editor;
mod error;
mod loader;
mod message;
mod rules;
mod settings;
mod store;

pub use editor::*;
pub use error::*;
pub use loader::*;
pub use message::*;
pub use rules::*;
pub use settings::*;
pub use store::*;
