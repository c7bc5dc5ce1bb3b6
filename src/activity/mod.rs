//! External activity (issue tracker) counts per contributor.
//!
//! Sources implement [`ActivitySource`], which has a single capability:
//! yield activity counts keyed by canonical identity. The scorer only sees
//! the resulting [`ActivityTally`], so the tracker behind it is swappable.

pub mod jira;

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::anomaly::Anomaly;
use crate::identity::{canonical_key, non_blank};

/// One tracker event. Every distinct non-blank name on it is credited once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityEvent {
    #[serde(default)]
    pub reporter: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub commenter: Option<String>,
}

impl ActivityEvent {
    fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = [&self.reporter, &self.assignee, &self.commenter]
            .into_iter()
            .filter_map(|n| non_blank(n.as_deref()))
            .collect();
        names.sort_unstable_by(|a, b| canonical_key(a).cmp(&canonical_key(b)).then(a.cmp(b)));
        names.dedup_by_key(|n| canonical_key(n));
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCount {
    /// Display name used if the contributor has no commit history.
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Default)]
pub struct ActivityTally {
    pub counts: BTreeMap<String, ActivityCount>,
    pub anomalies: Vec<Anomaly>,
}

impl ActivityTally {
    /// Count events per canonical key. Events with no usable name are
    /// skipped and recorded.
    pub fn from_events(events: &[ActivityEvent]) -> Self {
        let mut tally = ActivityTally::default();
        for (index, event) in events.iter().enumerate() {
            let names = event.names();
            if names.is_empty() {
                Anomaly::MalformedActivityRecord { index }.record(&mut tally.anomalies);
                continue;
            }
            for name in names {
                tally.credit(name);
            }
        }
        tally
    }

    fn credit(&mut self, name: &str) {
        let key = canonical_key(name);
        if key.is_empty() {
            Anomaly::unresolvable("activity", format!("display name {name:?}"))
                .record(&mut self.anomalies);
            return;
        }
        let entry = self.counts.entry(key).or_insert_with(|| ActivityCount {
            name: name.to_string(),
            count: 0,
        });
        entry.count += 1;
        // smallest variant wins so the label does not depend on event order
        if name < entry.name.as_str() {
            entry.name = name.to_string();
        }
    }

    /// Add `other`'s counts and anomalies to this tally.
    pub fn merge(&mut self, other: ActivityTally) {
        for (key, theirs) in other.counts {
            match self.counts.get_mut(&key) {
                Some(ours) => {
                    ours.count += theirs.count;
                    if theirs.name < ours.name {
                        ours.name = theirs.name;
                    }
                }
                None => {
                    self.counts.insert(key, theirs);
                }
            }
        }
        self.anomalies.extend(other.anomalies);
    }

    /// Drop every contributor `is_bot` accepts.
    pub fn retain_humans(&mut self, is_bot: impl Fn(&str, &ActivityCount) -> bool) {
        self.counts.retain(|key, count| !is_bot(key.as_str(), count));
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).map_or(0, |c| c.count)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

pub trait ActivitySource {
    /// Short label used in logs and anomaly records.
    fn name(&self) -> &str;

    fn activity(&self) -> Result<ActivityTally, Box<dyn Error>>;
}

/// Events stored as a JSON array of `{reporter, assignee, commenter}`.
pub struct FileActivitySource {
    path: PathBuf,
}

impl FileActivitySource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ActivitySource for FileActivitySource {
    fn name(&self) -> &str {
        "activity file"
    }

    fn activity(&self) -> Result<ActivityTally, Box<dyn Error>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("cannot read {}: {e}", self.path.display()))?;
        let events: Vec<ActivityEvent> = serde_json::from_str(&content)?;
        Ok(ActivityTally::from_events(&events))
    }
}

/// Load and merge activity from every source. A failing source
/// contributes nothing and is recorded as `ExternalSourceUnavailable`.
pub fn collect(sources: &[&dyn ActivitySource]) -> ActivityTally {
    let mut merged = ActivityTally::default();
    for source in sources {
        match source.activity() {
            Ok(tally) => {
                tracing::info!(
                    source = source.name(),
                    contributors = tally.counts.len(),
                    "activity loaded"
                );
                merged.merge(tally);
            }
            Err(e) => Anomaly::unavailable(source.name(), e).record(&mut merged.anomalies),
        }
    }
    if !sources.is_empty() && merged.is_empty() {
        tracing::info!("no activity found for any contributor");
    }
    merged
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
