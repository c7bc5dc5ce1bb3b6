use std::cmp::Ordering;

use crate::centrality::{ContributorScore, Scores};

/// Share of the total score mass the key set must reach.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Node tag in the exported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Key,
    Other,
}

impl NodeClass {
    pub fn of(key: &str, key_contributors: &[String]) -> Self {
        if key_contributors.iter().any(|k| k == key) {
            NodeClass::Key
        } else {
            NodeClass::Other
        }
    }

    /// Wire value: 1 for key contributors, 2 for everyone else.
    pub fn code(self) -> u8 {
        match self {
            NodeClass::Key => 1,
            NodeClass::Other => 2,
        }
    }
}

/// Scores ordered by score descending, ties by canonical key ascending.
pub fn rank(scores: &Scores) -> Vec<&ContributorScore> {
    let mut ranked: Vec<&ContributorScore> = scores.values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    ranked
}

/// Smallest ranked prefix whose cumulative score reaches
/// `threshold * total`. The top contributor is always included; a zero
/// total yields just the top contributor, no scores yield nothing.
pub fn select(scores: &Scores, threshold: f64) -> Vec<String> {
    let ranked = rank(scores);
    let total: f64 = ranked.iter().map(|s| s.score).sum();
    let target = threshold * total;

    let mut keys = Vec::new();
    let mut cumulative = 0.0;
    for entry in ranked {
        cumulative += entry.score;
        keys.push(entry.key.clone());
        if cumulative >= target {
            break;
        }
    }
    keys
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
