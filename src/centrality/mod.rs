//! Composite contributor importance.
//!
//! Each graph node scores
//!
//! ```text
//! degree_centrality + 0.5 * loc / max_loc + 0.5 * files / max_files
//!     + activity_weight * activity
//! ```
//!
//! where the maxima are floored to 1. Contributors known only from the
//! activity feed are added to the graph as isolated nodes and score
//! `activity_only_weight * activity` with no graph-based terms.

use std::collections::BTreeMap;

use crate::activity::ActivityTally;
use crate::graph::CollaborationGraph;
use crate::history::HistoryAggregate;
use crate::identity::Identities;

pub const DEFAULT_ACTIVITY_WEIGHT: f64 = 0.05;
pub const DEFAULT_ACTIVITY_ONLY_WEIGHT: f64 = 0.02;

const LOC_WEIGHT: f64 = 0.5;
const FILES_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub activity_weight: f64,
    pub activity_only_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activity_weight: DEFAULT_ACTIVITY_WEIGHT,
            activity_only_weight: DEFAULT_ACTIVITY_ONLY_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributorScore {
    pub key: String,
    pub name: String,
    pub degree: usize,
    pub degree_centrality: f64,
    pub loc: usize,
    pub files: usize,
    pub activity: u64,
    pub score: f64,
    pub is_activity_only: bool,
}

/// canonical key -> score
pub type Scores = BTreeMap<String, ContributorScore>;

/// Score every node of `graph`, then add activity-only contributors as
/// isolated nodes. Degree centrality is taken over the commit graph
/// alone, so activity-only nodes never shift other contributors' scores.
/// An empty graph with no activity gives no scores.
pub fn score(
    graph: &mut CollaborationGraph,
    history: &HistoryAggregate,
    activity: &ActivityTally,
    identities: &mut Identities,
    weights: ScoreWeights,
) -> Scores {
    let mut scores = graph_scores(graph, history, activity, weights);

    for (key, count) in &activity.counts {
        if graph.contains(key) {
            continue;
        }
        let name = &identities
            .add_activity_only(key, &count.name)
            .representative_name;
        graph.add_node(key, name, true);
        scores.insert(
            key.clone(),
            ContributorScore {
                key: key.clone(),
                name: name.clone(),
                degree: 0,
                degree_centrality: 0.0,
                loc: 0,
                files: 0,
                activity: count.count,
                score: weights.activity_only_weight * count.count as f64,
                is_activity_only: true,
            },
        );
    }

    tracing::debug!(
        scored = scores.len(),
        activity_only = scores.values().filter(|s| s.is_activity_only).count(),
        "centrality scores computed"
    );
    scores
}

fn graph_scores(
    graph: &CollaborationGraph,
    history: &HistoryAggregate,
    activity: &ActivityTally,
    weights: ScoreWeights,
) -> Scores {
    let centrality = graph.degree_centrality();
    let degrees = graph.degrees();

    let max_loc = history
        .loc_per_contributor
        .values()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let max_files = history
        .unique_files_per_contributor
        .values()
        .map(|files| files.len())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    graph
        .nodes()
        .filter(|node| !node.is_activity_only)
        .map(|node| {
            let key = node.key.as_str();
            let loc = history.loc(key);
            let files = history.unique_file_count(key);
            let activity_count = activity.count(key);
            let dc = centrality.get(key).copied().unwrap_or(0.0);
            let score = dc
                + LOC_WEIGHT * loc as f64 / max_loc
                + FILES_WEIGHT * files as f64 / max_files
                + weights.activity_weight * activity_count as f64;
            let entry = ContributorScore {
                key: key.to_string(),
                name: node.name.clone(),
                degree: degrees.get(key).copied().unwrap_or(0),
                degree_centrality: dc,
                loc,
                files,
                activity: activity_count,
                score,
                is_activity_only: false,
            };
            (key.to_string(), entry)
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
