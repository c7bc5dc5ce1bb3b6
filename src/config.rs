use serde::Deserialize;
use std::path::Path;

use crate::centrality::ScoreWeights;
use crate::history::DEFAULT_WINDOW_DAYS;
use crate::keyset::DEFAULT_THRESHOLD;

/// Config file looked up at the repository root when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = ".busfactor.toml";

/// Settings that can be placed in a `.busfactor.toml` file. Every field is
/// optional. CLI flags are parsed into the same shape and take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub window_days: Option<u32>,
    pub threshold: Option<f64>,
    pub activity_weight: Option<f64>,
    pub activity_only_weight: Option<f64>,
    pub include_merges: Option<bool>,
    pub jira_project: Option<String>,
}

/// Fully resolved analysis settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub window_days: u32,
    pub threshold: f64,
    pub weights: ScoreWeights,
    pub include_merges: bool,
    pub jira_project: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            threshold: DEFAULT_THRESHOLD,
            weights: ScoreWeights::default(),
            include_merges: false,
            jira_project: None,
        }
    }
}

impl FileConfig {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merged(self, overrides: FileConfig) -> FileConfig {
        FileConfig {
            window_days: overrides.window_days.or(self.window_days),
            threshold: overrides.threshold.or(self.threshold),
            activity_weight: overrides.activity_weight.or(self.activity_weight),
            activity_only_weight: overrides.activity_only_weight.or(self.activity_only_weight),
            include_merges: overrides.include_merges.or(self.include_merges),
            jira_project: overrides.jira_project.or(self.jira_project),
        }
    }

    /// Validates constraints that serde cannot enforce.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.window_days {
            return Err("Invalid 'window_days' value: 0. Must be 1 or greater".to_string());
        }

        if let Some(t) = self.threshold
            && !(t.is_finite() && t > 0.0 && t <= 1.0)
        {
            return Err(format!(
                "Invalid 'threshold' value: {t}. Must be greater than 0 and at most 1"
            ));
        }

        let weights: &[(&str, Option<f64>)] = &[
            ("activity_weight", self.activity_weight),
            ("activity_only_weight", self.activity_only_weight),
        ];
        for (name, val) in weights {
            if let Some(v) = val {
                if !v.is_finite() {
                    return Err(format!("Invalid '{name}': {v} is not a finite number"));
                }
                if *v < 0.0 {
                    return Err(format!("Invalid '{name}': {v}. Weights cannot be negative"));
                }
            }
        }

        if let Some(project) = &self.jira_project
            && project.trim().is_empty()
        {
            return Err("Invalid 'jira_project': empty project key".to_string());
        }

        Ok(())
    }

    /// Validate and fill unset fields with defaults.
    pub fn resolve(&self) -> Result<Settings, String> {
        self.validate()?;
        let defaults = Settings::default();
        Ok(Settings {
            window_days: self.window_days.unwrap_or(defaults.window_days),
            threshold: self.threshold.unwrap_or(defaults.threshold),
            weights: ScoreWeights {
                activity_weight: self
                    .activity_weight
                    .unwrap_or(defaults.weights.activity_weight),
                activity_only_weight: self
                    .activity_only_weight
                    .unwrap_or(defaults.weights.activity_only_weight),
            },
            include_merges: self.include_merges.unwrap_or(defaults.include_merges),
            jira_project: self.jira_project.clone(),
        })
    }
}

/// Reads, parses and validates a TOML config file from `path`.
pub fn load_config(path: &Path) -> Result<FileConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config file '{}': {e}", path.display()))?;
    let cfg: FileConfig = toml::from_str(&content)
        .map_err(|e| format!("Invalid config file '{}': {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| format!("Config file '{}': {e}", path.display()))?;
    Ok(cfg)
}

/// Load `explicit` if given, else `.busfactor.toml` under `repo_root` when
/// it exists, else an empty config.
pub fn discover_config(explicit: Option<&Path>, repo_root: &Path) -> Result<FileConfig, String> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = repo_root.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "using config file");
        load_config(&candidate)
    } else {
        Ok(FileConfig::default())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
