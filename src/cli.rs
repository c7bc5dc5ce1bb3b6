/// CLI argument definitions for the `bf` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::cli_help;
use crate::config::FileConfig;
use crate::report::SourceOptions;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "bf", version, about = "Bus factor and collaboration graph for git repositories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and log output on stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments shared by every analysis command.
#[derive(Args)]
pub struct AnalysisArgs {
    /// Repository to analyze (default: current directory)
    pub path: Option<PathBuf>,

    /// Recency window in days, counted back from the newest commit (default: 547)
    #[arg(long)]
    pub window_days: Option<u32>,

    /// Share of the total score the key contributors must reach, in (0, 1] (default: 0.3)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Score weight per activity event for contributors with commits (default: 0.05)
    #[arg(long)]
    pub activity_weight: Option<f64>,

    /// Score weight per activity event for activity-only contributors (default: 0.02)
    #[arg(long)]
    pub activity_only_weight: Option<f64>,

    /// Include merge commits (diffed against their first parent)
    #[arg(long)]
    pub include_merges: bool,

    /// Contributor registry: JSON array of {login, email, name, type}
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Load contributors from a GitHub repository (uses GITHUB_TOKEN if set)
    #[arg(long, value_name = "OWNER/REPO")]
    pub github: Option<String>,

    /// Activity events: JSON array of {reporter, assignee, commenter}
    #[arg(long, value_name = "FILE")]
    pub activity: Option<PathBuf>,

    /// Load activity from a Jira project (uses JIRA_SERVER, JIRA_EMAIL, JIRA_API_TOKEN)
    #[arg(long, value_name = "KEY")]
    pub jira_project: Option<String>,

    /// Config file (default: .busfactor.toml at the repository root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl AnalysisArgs {
    pub fn target(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn sources(&self) -> SourceOptions {
        SourceOptions {
            registry: self.registry.clone(),
            github: self.github.clone(),
            activity: self.activity.clone(),
            config: self.config.clone(),
            overrides: FileConfig {
                window_days: self.window_days,
                threshold: self.threshold,
                activity_weight: self.activity_weight,
                activity_only_weight: self.activity_only_weight,
                include_merges: self.include_merges.then_some(true),
                jira_project: self.jira_project.clone(),
            },
        }
    }
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rank contributors and select the key contributors (bus factor)
    #[command(long_about = cli_help::KEYS)]
    Keys {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,

        /// Show only the top N contributors (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Print the collaboration graph as node-link JSON
    #[command(long_about = cli_help::GRAPH)]
    Graph {
        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Show the key contributors' share of every file they touched
    #[command(long_about = cli_help::SHARES)]
    Shares {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show only the top N files per contributor (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Generate a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
