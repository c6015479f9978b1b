//! Logging setup.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &[
    "feedfilter",
    "feedfilter_cli",
    "feedfilter_config",
    "feedfilter_core",
    "feedfilter_watch",
];

/// Filter directives enabling `level` for every workspace crate.
pub fn directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Logs go to stderr; stdout carries output.
///
/// `RUST_LOG` takes precedence when set.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
