//! Bus factor analysis for git repositories.
//!
//! Commit authors are merged into canonical contributors, a weighted
//! co-editing graph is built from the recent history, every contributor
//! gets a composite centrality score, and the smallest set of top-ranked
//! contributors holding a fixed share of the total score is reported as
//! the key contributors.

pub mod activity;
pub mod anomaly;
pub mod centrality;
pub mod cli;
pub mod cli_help;
pub mod config;
pub mod git;
pub mod graph;
pub mod history;
pub mod identity;
pub mod keyset;
pub mod pipeline;
pub mod progress;
pub mod registry;
pub mod report;
pub mod report_helpers;
