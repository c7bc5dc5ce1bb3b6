//! History aggregation: folds the commit sequence inside the recency
//! window into per-contributor and per-file line totals.
//!
//! The window ends at the newest commit and reaches back `window_days`.
//! Every commit is tested against the cutoff, so history that is not in
//! strict time order is filtered correctly instead of being truncated at
//! the first old commit.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Duration;
use serde::Serialize;

use crate::git::RawCommit;
use crate::identity::Identities;
use crate::progress::{PercentTicker, Progress};

/// 1.5 years.
pub const DEFAULT_WINDOW_DAYS: u32 = 547;

/// One retained, non-bot commit after identity resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub time: i64,
    pub author_key: String,
    pub lines_changed: usize,
    pub per_file_lines: BTreeMap<String, usize>,
}

impl CommitRecord {
    pub fn files_touched(&self) -> impl Iterator<Item = &str> {
        self.per_file_lines.keys().map(String::as_str)
    }
}

/// Unix-second bounds of the analysed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Default)]
pub struct HistoryAggregate {
    /// canonical key -> insertions + deletions
    pub loc_per_contributor: BTreeMap<String, usize>,
    pub unique_files_per_contributor: BTreeMap<String, BTreeSet<String>>,
    /// canonical key -> file -> lines changed by that contributor
    pub files_per_contributor_with_sizes: BTreeMap<String, BTreeMap<String, usize>>,
    /// file -> lines changed by everyone
    pub all_files_with_sizes: BTreeMap<String, usize>,
    pub commits: Vec<CommitRecord>,
    pub window: Option<Window>,
    pub bot_commits_skipped: usize,
}

/// Earliest commit time kept when the newest commit is at `latest`.
pub fn cutoff(latest: i64, window_days: u32) -> i64 {
    latest - Duration::days(i64::from(window_days)).num_seconds()
}

/// Window ending at the newest commit of `history`; `None` for no commits.
pub fn window(history: &[RawCommit], window_days: u32) -> Option<Window> {
    let latest = history.iter().map(|c| c.time).max()?;
    Some(Window {
        start: cutoff(latest, window_days),
        end: latest,
    })
}

impl Window {
    pub fn contains(&self, time: i64) -> bool {
        (self.start..=self.end).contains(&time)
    }
}

impl HistoryAggregate {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn loc(&self, key: &str) -> usize {
        self.loc_per_contributor.get(key).copied().unwrap_or(0)
    }

    pub fn unique_file_count(&self, key: &str) -> usize {
        self.unique_files_per_contributor
            .get(key)
            .map_or(0, BTreeSet::len)
    }

    fn fold(&mut self, record: CommitRecord) {
        let key = &record.author_key;
        *self.loc_per_contributor.entry(key.clone()).or_insert(0) += record.lines_changed;

        let unique = self
            .unique_files_per_contributor
            .entry(key.clone())
            .or_default();
        let sizes = self
            .files_per_contributor_with_sizes
            .entry(key.clone())
            .or_default();

        for (path, &lines) in &record.per_file_lines {
            unique.insert(path.clone());
            *sizes.entry(path.clone()).or_insert(0) += lines;
            *self.all_files_with_sizes.entry(path.clone()).or_insert(0) += lines;
        }

        self.commits.push(record);
    }
}

/// Aggregate `history` (newest first) over the last `window_days` before
/// its most recent commit. Bot-authored commits and commits whose author
/// cannot be resolved are skipped.
pub fn aggregate(
    history: &[RawCommit],
    identities: &Identities,
    window_days: u32,
    progress: &dyn Progress,
) -> HistoryAggregate {
    let mut agg = HistoryAggregate::default();

    let Some(window) = window(history, window_days) else {
        tracing::info!("no commits in history");
        return agg;
    };
    agg.window = Some(window);

    let ticker = PercentTicker::new(progress, "Calculating LOC and file diversity", history.len());

    for (i, commit) in history.iter().enumerate() {
        ticker.tick(i + 1);

        if !window.contains(commit.time) {
            continue;
        }

        let Some(author_key) = identities.key_for_author(&commit.author_name, &commit.author_email)
        else {
            continue;
        };
        if identities.is_bot(&author_key) {
            agg.bot_commits_skipped += 1;
            continue;
        }

        let mut per_file_lines: BTreeMap<String, usize> = BTreeMap::new();
        for change in &commit.files {
            *per_file_lines.entry(change.path.clone()).or_insert(0) += change.lines();
        }

        agg.fold(CommitRecord {
            time: commit.time,
            author_key,
            lines_changed: commit.insertions() + commit.deletions(),
            per_file_lines,
        });
    }

    tracing::debug!(
        retained = agg.commits.len(),
        bots = agg.bot_commits_skipped,
        files = agg.all_files_with_sizes.len(),
        "history aggregated"
    );

    agg
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
