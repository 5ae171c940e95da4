// crates/cli/src/logging.rs
//! ログ出力の初期化
//!
//! Records from the library crates go through the `log` facade and are
//! bridged into the `tracing` subscriber installed here.

use crate::args::BehaviorOptions;
use crate::error::{AppError, Result};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Default filter directive for the given flags.
#[must_use]
pub fn default_level(behavior: &BehaviorOptions) -> &'static str {
    if behavior.quiet {
        return "error";
    }
    match behavior.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flags.
///
/// # Errors
///
/// Fails if the log file cannot be created or a subscriber is already set.
pub fn init(behavior: &BehaviorOptions) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(behavior)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    let file_layer = behavior
        .log_file
        .as_ref()
        .map(|path| -> Result<_> {
            let file = File::create(path)?;
            Ok(fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::WARN))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
