//! Report builder: opens the repository, loads settings and external
//! sources, reads history and runs the pipeline.

use std::error::Error;
use std::path::Path;

use crate::activity::jira::JiraSource;
use crate::activity::{self, ActivitySource, FileActivitySource};
use crate::anomaly::Anomaly;
use crate::config::discover_config;
use crate::git::GitRepo;
use crate::pipeline::{self, BusFactorReport, Inputs};
use crate::progress::Progress;
use crate::registry::github::GithubRegistry;
use crate::registry::{self, FileRegistry, RegistrySource};

use super::SourceOptions;

/// Build the report for the repository containing `path`. Registry and
/// activity failures degrade to anomalies; a missing repository, a bad
/// config or an unreadable history are errors.
pub fn build_report(
    path: &Path,
    sources: &SourceOptions,
    progress: &dyn Progress,
) -> Result<BusFactorReport, Box<dyn Error>> {
    let git_repo =
        GitRepo::open(path).map_err(|e| format!("not a git repository (or any parent): {e}"))?;

    let settings = discover_config(sources.config.as_deref(), git_repo.root())?
        .merged(sources.overrides.clone())
        .resolve()?;

    progress.update("Reading commit history...");
    let history = git_repo.commit_history(settings.include_merges, settings.window_days)?;
    tracing::info!(commits = history.len(), "history read");

    let mut registry_sources: Vec<Box<dyn RegistrySource>> = Vec::new();
    if let Some(file) = &sources.registry {
        registry_sources.push(Box::new(FileRegistry::new(file)));
    }
    if let Some(slug) = &sources.github {
        registry_sources.push(Box::new(GithubRegistry::new(slug)?));
    }
    let refs: Vec<&dyn RegistrySource> = registry_sources.iter().map(|s| s.as_ref()).collect();
    let (registry, mut anomalies) = registry::collect(&refs, progress);

    let mut activity_sources: Vec<Box<dyn ActivitySource>> = Vec::new();
    if let Some(file) = &sources.activity {
        activity_sources.push(Box::new(FileActivitySource::new(file)));
    }
    if let Some(project) = &settings.jira_project {
        match JiraSource::from_env(project) {
            Ok(jira) => activity_sources.push(Box::new(jira)),
            Err(e) => Anomaly::unavailable("jira", e).record(&mut anomalies),
        }
    }
    let refs: Vec<&dyn ActivitySource> = activity_sources.iter().map(|s| s.as_ref()).collect();
    let activity = activity::collect(&refs);

    let inputs = Inputs {
        history: &history,
        registry: &registry,
        activity,
        anomalies,
    };
    let line_count = |rel_path: &str| git_repo.line_count_at_head(rel_path);
    let report = pipeline::analyze(inputs, &settings, progress, &line_count)?;
    Ok(report)
}
