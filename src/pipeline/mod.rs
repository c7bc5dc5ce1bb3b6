//! One analysis run, from raw history to a finished [`BusFactorReport`].
//!
//! Steps run strictly in order: resolve identities, aggregate history,
//! build the collaboration graph, score, select key contributors, compute
//! their shares. Each step takes the previous step's output by value or
//! reference; nothing outlives the run.

pub mod data;

use std::collections::BTreeMap;

use crate::activity::ActivityTally;
use crate::anomaly::Anomaly;
use crate::centrality::{self, Scores};
use crate::config::Settings;
use crate::git::RawCommit;
use crate::graph::{CollaborationGraph, GraphError};
use crate::history::{self, HistoryAggregate, aggregate};
use crate::identity::{Identities, RawIdentity, has_bot_marker};
use crate::keyset::{self, NodeClass};
use crate::progress::Progress;

pub use data::*;

/// Everything a run consumes. `anomalies` carries problems already hit
/// while loading the external sources.
pub struct Inputs<'a> {
    pub history: &'a [RawCommit],
    pub registry: &'a [RawIdentity],
    pub activity: ActivityTally,
    pub anomalies: Vec<Anomaly>,
}

pub fn analyze(
    inputs: Inputs<'_>,
    settings: &Settings,
    progress: &dyn Progress,
    line_count_at_head: &dyn Fn(&str) -> Option<usize>,
) -> Result<BusFactorReport, GraphError> {
    let Inputs {
        history,
        registry,
        mut activity,
        mut anomalies,
    } = inputs;

    progress.update("Resolving identities...");
    // representative names count commits inside the window only
    let window = history::window(history, settings.window_days);
    let (mut identities, found) = Identities::resolve(
        registry,
        history
            .iter()
            .filter(|c| window.is_some_and(|w| w.contains(c.time)))
            .map(|c| (c.author_name.as_str(), c.author_email.as_str())),
    );
    anomalies.extend(found);

    let agg = aggregate(history, &identities, settings.window_days, progress);
    if agg.is_empty() && !history.is_empty() {
        tracing::warn!(
            window_days = settings.window_days,
            "no human commits inside the window"
        );
    }
    tracing::info!(
        commits = agg.commits.len(),
        contributors = agg.loc_per_contributor.len(),
        identities = identities.len(),
        "contributors aggregated"
    );

    progress.update("Building collaboration graph...");
    let mut graph = CollaborationGraph::build(&agg.commits, &identities)?;
    progress.update("Collaboration graph ready!");

    anomalies.append(&mut activity.anomalies);
    activity.retain_humans(|key, count| identities.is_bot(key) || has_bot_marker(&count.name));

    progress.update("Calculating centrality scores...");
    let scores = centrality::score(
        &mut graph,
        &agg,
        &activity,
        &mut identities,
        settings.weights,
    );
    let key_contributors = keyset::select(&scores, settings.threshold);
    progress.update("Graphs ready!");

    Ok(assemble(
        &agg,
        &graph,
        &scores,
        &key_contributors,
        line_count_at_head,
        anomalies,
    ))
}

fn assemble(
    agg: &HistoryAggregate,
    graph: &CollaborationGraph,
    scores: &Scores,
    key_contributors: &[String],
    line_count_at_head: &dyn Fn(&str) -> Option<usize>,
    anomalies: Vec<Anomaly>,
) -> BusFactorReport {
    let name_of = |key: &str| -> String {
        scores
            .get(key)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| key.to_string())
    };

    let contributors: Vec<ContributorEntry> = keyset::rank(scores)
        .into_iter()
        .map(|s| ContributorEntry {
            key: s.key.clone(),
            name: s.name.clone(),
            is_key: key_contributors.contains(&s.key),
            is_activity_only: s.is_activity_only,
            degree: s.degree,
            degree_centrality: s.degree_centrality,
            loc: s.loc,
            files: s.files,
            activity: s.activity,
            score: s.score,
        })
        .collect();

    let graph_data = GraphData {
        nodes: graph
            .nodes()
            .map(|node| GraphNode {
                id: node.name.clone(),
                size: scores.get(&node.key).map_or(0.0, |s| s.score),
                class: NodeClass::of(&node.key, key_contributors).code(),
            })
            .collect(),
        edges: graph
            .edges()
            .map(|(a, b, weight)| GraphEdge {
                source: name_of(a),
                target: name_of(b),
                weight,
            })
            .collect(),
    };

    let files_per_contributor_with_percentages = keyset::contribution_shares(
        &agg.all_files_with_sizes,
        &agg.files_per_contributor_with_sizes,
        key_contributors,
    )
    .into_iter()
    .map(|(key, files)| (name_of(key.as_str()), files))
    .collect();

    let key_file_sizes = key_contributors
        .iter()
        .map(|key| {
            let sizes: BTreeMap<String, Option<usize>> = agg
                .unique_files_per_contributor
                .get(key)
                .into_iter()
                .flatten()
                .map(|path| (path.clone(), line_count_at_head(path)))
                .collect();
            (name_of(key.as_str()), sizes)
        })
        .collect();

    BusFactorReport {
        bus_factor: key_contributors.len(),
        key_contributors: key_contributors.iter().map(|k| name_of(k.as_str())).collect(),
        contributors,
        graph: graph_data,
        unique_files_per_contributor: agg.unique_files_per_contributor.clone(),
        loc_per_contributor: agg.loc_per_contributor.clone(),
        all_files_with_sizes: agg.all_files_with_sizes.clone(),
        files_per_contributor_with_percentages,
        key_file_sizes,
        window: agg.window,
        commits_analyzed: agg.commits.len(),
        bot_commits_skipped: agg.bot_commits_skipped,
        anomalies,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
