//! Bus-factor report commands (`bf keys`, `bf graph`, `bf shares`).
//!
//! Each command opens the repository, loads the optional registry and
//! activity sources, runs the analysis pipeline once and prints one view
//! of the resulting [`BusFactorReport`] as a table or JSON.

/// Source loading and pipeline invocation.
mod builder;
/// JSON output.
mod json;
/// Terminal tables.
mod table;

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::config::FileConfig;
use crate::pipeline::BusFactorReport;
use crate::progress::LogProgress;

pub use builder::build_report;

/// Where the run's external inputs come from, plus CLI setting overrides.
#[derive(Debug, Default, Clone)]
pub struct SourceOptions {
    pub registry: Option<PathBuf>,
    pub github: Option<String>,
    pub activity: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub overrides: FileConfig,
}

fn analyze(path: &Path, sources: &SourceOptions) -> Result<BusFactorReport, Box<dyn Error>> {
    build_report(path, sources, &LogProgress)
}

/// Ranked contributors with key-contributor markers.
pub fn run_keys(
    path: &Path,
    sources: &SourceOptions,
    json: bool,
    top: usize,
) -> Result<(), Box<dyn Error>> {
    let report = analyze(path, sources)?;
    if json {
        json::print_report(&report)
    } else {
        table::print_keys(&report, top);
        Ok(())
    }
}

/// Collaboration graph as node-link JSON.
pub fn run_graph(path: &Path, sources: &SourceOptions) -> Result<(), Box<dyn Error>> {
    let report = analyze(path, sources)?;
    json::print_graph(&report)
}

/// Per-file contribution percentages of the key contributors.
pub fn run_shares(
    path: &Path,
    sources: &SourceOptions,
    json: bool,
    top: usize,
) -> Result<(), Box<dyn Error>> {
    let report = analyze(path, sources)?;
    if json {
        json::print_shares(&report)
    } else {
        table::print_shares(&report, top);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
