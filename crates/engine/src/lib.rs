// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::PathBuf;

pub mod config;
pub mod error;
pub mod filesystem;
pub mod processor;
pub mod routing;
pub mod settings;
pub mod stats;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::filesystem::{FileVisitor, WalkedFile};
use crate::processor::FileJob;
use crate::routing::{LanguageRouter, PathFilter};
use crate::stats::{FileReport, RunResult};

/// Turns walked files into classification jobs.
struct JobCollector<'a> {
    router: &'a LanguageRouter,
    filter: &'a PathFilter,
    strict: bool,
    jobs: Vec<FileJob>,
    errors: Vec<(PathBuf, EngineError)>,
}

impl FileVisitor for JobCollector<'_> {
    fn visit_file(&mut self, file: WalkedFile) -> Result<()> {
        let Some(route) = self.router.route(&file.path) else {
            log::debug!("Unsupported file {}", file.path.display());
            return Ok(());
        };
        let is_test = self.filter.is_test(file.relative());
        self.jobs.push(FileJob {
            language: route.tag.clone(),
            table: route.table.clone(),
            is_test,
            path: file.path,
        });
        Ok(())
    }

    fn walk_error(&mut self, error: EngineError) -> Result<()> {
        if self.strict {
            return Err(error);
        }
        log::warn!("{error}");
        self.errors.push((PathBuf::from("<walk>"), error));
        Ok(())
    }
}

/// Run the line classification engine.
///
/// Files are walked and routed first, then classified (on a dedicated thread
/// pool when more than one thread is configured) and folded into the totals
/// in walk order.
///
/// # Errors
///
/// Fails on invalid settings or patterns and on over-counted files. In
/// strict mode the first unreadable or partially classified file is an
/// error too; otherwise such files are collected in `RunResult::errors` or
/// reported through `FileReport::remainder`.
pub fn run(config: &Config) -> Result<RunResult> {
    let router = LanguageRouter::new(&config.settings, &config.filter.map_ext)?;
    let filter = PathFilter::new(&config.filter)?;

    let mut collector = JobCollector {
        router: &router,
        filter: &filter,
        strict: config.strict,
        jobs: Vec::new(),
        errors: Vec::new(),
    };
    filesystem::walk(&config.walk, &filter, &mut collector)?;
    let JobCollector { jobs, errors, .. } = collector;

    let threads = config.walk.resolved_threads();
    let outcomes: Vec<Result<Option<FileReport>>> = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| jobs.par_iter().map(processor::process_file).collect())
    } else {
        jobs.iter().map(processor::process_file).collect()
    };

    let mut result = RunResult {
        errors,
        ..RunResult::default()
    };
    for (job, outcome) in jobs.into_iter().zip(outcomes) {
        match outcome {
            Ok(Some(report)) => fold(&mut result, report, config.strict)?,
            Ok(None) => {}
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                log::warn!("{e}");
                result.errors.push((job.path, e));
            }
        }
    }

    Ok(result)
}

fn fold(result: &mut RunResult, report: FileReport, strict: bool) -> Result<()> {
    if strict && let Some(remainder) = &report.remainder {
        return Err(EngineError::Desync {
            path: report.path,
            line: remainder.line,
        });
    }
    result
        .totals
        .record(&report.counts, &report.language, report.is_test)?;
    result.files.push(report);
    Ok(())
}
