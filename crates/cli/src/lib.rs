// crates/cli/src/lib.rs
pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;

use crate::args::Args;
use crate::config::Config;
use crate::error::Result;
use crate::presentation::Report;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs one count and writes the report.
///
/// # Errors
///
/// Fails on invalid options or settings, on engine errors and when the
/// report cannot be written.
pub fn execute(args: &Args) -> Result<()> {
    let config = Config::try_from(args)?;
    let result = code_count_engine::run(&config)?;

    if !result.errors.is_empty() {
        log::warn!("{} file(s) could not be read", result.errors.len());
    }
    let partial = result.desynced().count();
    if partial > 0 {
        log::warn!("{partial} file(s) were only partially classified");
    }

    let files = args.output.files.then_some(result.files.as_slice());
    let report = Report::new(&result.totals, files);
    let text = presentation::render(&report, args.output.format)?;
    presentation::emit(&text, args.output.output.as_deref())
}
