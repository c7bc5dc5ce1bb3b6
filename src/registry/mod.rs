//! Contributor registries: where logins, emails, display names and
//! account kinds come from before commit authors are resolved.

pub mod github;

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::anomaly::Anomaly;
use crate::identity::RawIdentity;
use crate::progress::Progress;

pub trait RegistrySource {
    /// Short label used in logs and anomaly records.
    fn name(&self) -> &str;

    fn identities(&self, progress: &dyn Progress) -> Result<Vec<RawIdentity>, Box<dyn Error>>;
}

/// A JSON array of `{login, email?, name?, type?}` entries.
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RegistrySource for FileRegistry {
    fn name(&self) -> &str {
        "registry file"
    }

    fn identities(&self, _progress: &dyn Progress) -> Result<Vec<RawIdentity>, Box<dyn Error>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("cannot read {}: {e}", self.path.display()))?;
        let entries: Vec<RawIdentity> = serde_json::from_str(&content)?;
        Ok(entries)
    }
}

/// Concatenate the entries of every source. A failing source contributes
/// nothing and is recorded as `ExternalSourceUnavailable`.
pub fn collect(
    sources: &[&dyn RegistrySource],
    progress: &dyn Progress,
) -> (Vec<RawIdentity>, Vec<Anomaly>) {
    let mut entries = Vec::new();
    let mut anomalies = Vec::new();
    for source in sources {
        match source.identities(progress) {
            Ok(found) => {
                tracing::info!(source = source.name(), entries = found.len(), "registry loaded");
                entries.extend(found);
            }
            Err(e) => Anomaly::unavailable(source.name(), e).record(&mut anomalies),
        }
    }
    (entries, anomalies)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
