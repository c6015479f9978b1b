use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "feedfilter")]
#[command(about = "feedfilter - hide feed posts that mention configured keywords")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace). Defaults to warn
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/feedfilter/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings file path (overrides the config file)
    #[arg(long, global = true, env = "FEEDFILTER_SETTINGS")]
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// Effective log level: `--log-level`, else `--verbose`, else warn.
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter an HTML snapshot and write the annotated document
    Filter {
        /// HTML file to filter
        input: PathBuf,

        /// Write the filtered HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the pass report as JSON instead of the HTML
        #[arg(long)]
        json: bool,
    },

    /// Load a page, then replay incremental loads against it
    ///
    /// Each chunk is an HTML fragment appended to the feed in order. Chunks
    /// ending in `.json` are delivered as settings-update messages instead.
    Replay {
        /// Initial HTML page
        initial: PathBuf,

        /// Fragments (or `.json` control messages) to apply in order
        #[arg(required = true)]
        chunks: Vec<PathBuf>,

        /// Selector of the element fragments are appended to (defaults to body)
        #[arg(long)]
        into: Option<String>,

        /// Write the final HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary instead of the HTML
        #[arg(long)]
        json: bool,
    },

    /// Manage the keyword list
    #[command(subcommand)]
    Keywords(KeywordCommands),

    /// Turn case-sensitive matching on or off
    CaseSensitive {
        /// true/false (also accepts yes/no, on/off, 1/0)
        #[arg(action = ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },

    /// Show keyword and hidden-post counts
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum KeywordCommands {
    /// List configured keywords
    List,

    /// Add a keyword (surrounding whitespace is trimmed)
    Add {
        /// Keyword or phrase
        keyword: String,
    },

    /// Remove a keyword
    Remove {
        /// Keyword or phrase, exactly as listed
        keyword: String,
    },
}
