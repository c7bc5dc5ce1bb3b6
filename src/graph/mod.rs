//! Collaboration graph: contributors are nodes, and two contributors are
//! joined by an edge weighted with the number of distinct files both
//! touched inside the window.
//!
//! Nodes are keyed by canonical key and labelled with the contributor's
//! representative name. Edges are stored once per unordered pair
//! `(a, b)` with `a < b`, so the graph is simple and undirected.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::history::CommitRecord;
use crate::identity::Identities;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("no representative name stored for contributor key {0:?}")]
    MissingRepresentative(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub key: String,
    pub name: String,
    pub is_activity_only: bool,
}

#[derive(Debug, Default)]
pub struct CollaborationGraph {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<(String, String), usize>,
}

impl CollaborationGraph {
    /// Build the graph from retained commits. Every author becomes a node,
    /// even one that shares no file with anybody.
    pub fn build(
        commits: &[CommitRecord],
        identities: &Identities,
    ) -> Result<Self, GraphError> {
        let mut file_contributors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut authors: BTreeSet<&str> = BTreeSet::new();

        for commit in commits {
            authors.insert(&commit.author_key);
            for file in commit.files_touched() {
                file_contributors
                    .entry(file)
                    .or_default()
                    .insert(&commit.author_key);
            }
        }

        let mut graph = CollaborationGraph::default();
        for key in authors {
            let name = identities
                .representative(key)
                .ok_or_else(|| GraphError::MissingRepresentative(key.to_string()))?;
            graph.add_node(key, name, false);
        }

        for contributors in file_contributors.values() {
            let keys: Vec<&str> = contributors.iter().copied().collect();
            for i in 0..keys.len() {
                for j in (i + 1)..keys.len() {
                    // BTreeSet iteration is sorted, so keys[i] < keys[j]
                    *graph
                        .edges
                        .entry((keys[i].to_string(), keys[j].to_string()))
                        .or_insert(0) += 1;
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "collaboration graph built"
        );
        Ok(graph)
    }

    /// Insert a node if its key is not present yet.
    pub fn add_node(&mut self, key: &str, name: &str, is_activity_only: bool) {
        self.nodes.entry(key.to_string()).or_insert_with(|| Node {
            key: key.to_string(),
            name: name.to_string(),
            is_activity_only,
        });
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges as `(key_a, key_b, weight)` with `key_a < key_b`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.edges
            .iter()
            .map(|((a, b), &w)| (a.as_str(), b.as_str(), w))
    }

    /// Degree of every node, computed in one pass over the edges.
    pub fn degrees(&self) -> BTreeMap<&str, usize> {
        let mut degrees: BTreeMap<&str, usize> =
            self.nodes.keys().map(|k| (k.as_str(), 0)).collect();
        for (a, b) in self.edges.keys() {
            *degrees.entry(a.as_str()).or_insert(0) += 1;
            *degrees.entry(b.as_str()).or_insert(0) += 1;
        }
        degrees
    }

    /// Normalized degree centrality: degree / (|V| - 1). A lone node
    /// scores 1.0.
    pub fn degree_centrality(&self) -> BTreeMap<&str, f64> {
        let n = self.node_count();
        if n <= 1 {
            return self.nodes.keys().map(|k| (k.as_str(), 1.0)).collect();
        }
        let denom = (n - 1) as f64;
        self.degrees()
            .into_iter()
            .map(|(k, d)| (k, d as f64 / denom))
            .collect()
    }
}

#[cfg(test)]
impl CollaborationGraph {
    pub(crate) fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Weight of the edge between two keys, in either order.
    pub(crate) fn weight(&self, a: &str, b: &str) -> Option<usize> {
        let pair = if a <= b { (a, b) } else { (b, a) };
        self.edges
            .get(&(pair.0.to_string(), pair.1.to_string()))
            .copied()
    }

    pub(crate) fn degree(&self, key: &str) -> usize {
        self.edges
            .keys()
            .filter(|(a, b)| a == key || b == key)
            .count()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
