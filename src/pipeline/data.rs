/// Serializable result of one analysis run.
///
/// Every map is a `BTreeMap` so two runs over the same input serialize to
/// byte-identical JSON.
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::anomaly::Anomaly;
use crate::history::Window;

#[derive(Debug, Serialize)]
pub struct BusFactorReport {
    /// Number of key contributors.
    pub bus_factor: usize,
    /// Representative names of the key contributors, highest score first.
    pub key_contributors: Vec<String>,
    /// Every scored contributor, highest score first.
    pub contributors: Vec<ContributorEntry>,
    pub graph: GraphData,
    /// canonical key -> files touched in the window
    pub unique_files_per_contributor: BTreeMap<String, BTreeSet<String>>,
    /// canonical key -> insertions + deletions
    pub loc_per_contributor: BTreeMap<String, usize>,
    /// file -> lines changed by everyone
    pub all_files_with_sizes: BTreeMap<String, usize>,
    /// key contributor -> file -> percentage of the file's changed lines
    pub files_per_contributor_with_percentages: BTreeMap<String, BTreeMap<String, f64>>,
    /// key contributor -> file -> line count at HEAD (`null` if gone)
    pub key_file_sizes: BTreeMap<String, BTreeMap<String, Option<usize>>>,
    pub window: Option<Window>,
    pub commits_analyzed: usize,
    pub bot_commits_skipped: usize,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorEntry {
    pub key: String,
    pub name: String,
    pub is_key: bool,
    pub is_activity_only: bool,
    pub degree: usize,
    pub degree_centrality: f64,
    pub loc: usize,
    pub files: usize,
    pub activity: u64,
    pub score: f64,
}

/// Node-link graph: `{nodes: [{id, size, class}], edges: [{source, target, weight}]}`.
#[derive(Debug, Default, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Representative name.
    pub id: String,
    /// Composite score.
    pub size: f64,
    /// 1 = key contributor, 2 = other.
    pub class: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Number of distinct files both contributors touched.
    pub weight: usize,
}

#[cfg(test)]
impl BusFactorReport {
    pub(crate) fn contributor(&self, name: &str) -> Option<&ContributorEntry> {
        self.contributors.iter().find(|c| c.name == name)
    }
}
