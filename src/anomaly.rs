//! Per-record anomalies recovered during an analysis run.
//!
//! None of these abort the run. Each one is logged as a warning when it
//! is recorded and then carried into the final report so callers can see
//! what was skipped.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// An identity with no usable login, name or email.
    #[error("unresolvable identity from {origin}: {detail}")]
    UnresolvableIdentity { origin: String, detail: String },

    /// An activity event with no reporter, assignee or commenter name.
    #[error("malformed activity record #{index}: no reporter, assignee or commenter")]
    MalformedActivityRecord { index: usize },

    /// A registry or activity source could not be loaded.
    #[error("external source unavailable ({origin}): {reason}")]
    ExternalSourceUnavailable { origin: String, reason: String },
}

impl Anomaly {
    pub fn unresolvable(origin: &str, detail: impl Into<String>) -> Self {
        Anomaly::UnresolvableIdentity {
            origin: origin.to_string(),
            detail: detail.into(),
        }
    }

    pub fn unavailable(origin: &str, reason: impl ToString) -> Self {
        Anomaly::ExternalSourceUnavailable {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Log the anomaly and append it to `sink`.
    pub fn record(self, sink: &mut Vec<Anomaly>) {
        tracing::warn!("{self}");
        sink.push(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_origin() {
        let a = Anomaly::unresolvable("registry", "entry #3");
        assert_eq!(
            a.to_string(),
            "unresolvable identity from registry: entry #3"
        );
    }

    #[test]
    fn record_appends() {
        let mut sink = Vec::new();
        Anomaly::MalformedActivityRecord { index: 2 }.record(&mut sink);
        Anomaly::unavailable("jira", "timeout").record(&mut sink);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], Anomaly::MalformedActivityRecord { index: 2 });
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Anomaly::MalformedActivityRecord { index: 7 }).unwrap();
        assert_eq!(json["kind"], "malformed_activity_record");
        assert_eq!(json["index"], 7);
    }
}
