//! Logging flags and tracing subscriber setup.

use crate::{CliError, CliResult};
use clap::{ArgAction, Args};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Logging arguments shared by the indexer binaries.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level (0-5).
    ///
    /// `0` disables logging, `-v` prints errors and each further `v` adds a level up to trace.
    #[arg(
        short = 'v',
        long = "verbosity",
        global = true,
        default_value_t = 3,
        action = ArgAction::Count,
    )]
    pub level: u8,
    /// Disable ANSI colors in log output.
    #[arg(long = "log.no-color", global = true, env = "BOBA_INDEXER_LOG_NO_COLOR")]
    pub no_color: bool,
}

impl Default for LogArgs {
    fn default() -> Self {
        Self { level: 3, no_color: false }
    }
}

impl LogArgs {
    /// Installs the global tracing subscriber for these arguments, honoring `RUST_LOG`.
    pub fn init_tracing(&self) -> CliResult<()> {
        init_tracing_subscriber(self.level, !self.no_color, None::<EnvFilter>)
    }
}

/// Maps a `-v` count to the maximum enabled level.
pub const fn verbosity_to_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initializes the global tracing subscriber.
///
/// Directives from `filter` (or `RUST_LOG` when `None`) are layered on top of the level
/// derived from `verbosity`.
pub fn init_tracing_subscriber(
    verbosity: u8,
    ansi: bool,
    filter: Option<impl Into<EnvFilter>>,
) -> CliResult<()> {
    let filter = filter
        .map(Into::into)
        .unwrap_or_else(EnvFilter::from_default_env)
        .add_directive(verbosity_to_level(verbosity).into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .try_init()
        .map_err(|e| CliError::Tracing(e.to_string()))
}
