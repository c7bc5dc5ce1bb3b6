//! Long help text constants for CLI subcommands.
//!
//! Extracted from `cli.rs` to keep the argument definitions concise.

/// Key contributors: composite score and cumulative-mass selection.
pub const KEYS: &str = "\
Rank contributors and select the key contributors of a git repository.

Only commits inside the recency window count: the window ends at the newest
commit and reaches back --window-days (default 547, about 1.5 years). Bot
accounts are excluded. Author aliases are merged by canonical key (letters
and digits only, lower-cased), so \"J.Doe\" and \"jdoe\" are one person.

Score per contributor:
  degree_centrality              -- collaborators / (contributors - 1)
  + 0.5 * loc / max_loc          -- lines added + removed
  + 0.5 * files / max_files      -- distinct files touched
  + activity_weight * activity   -- tracker events (default 0.05)

Contributors seen only in the activity feed score
  activity_only_weight * activity (default 0.02).

Contributors are ranked by score (ties by name) and taken in order until
their cumulative score reaches --threshold (default 0.3) of the total.
The bus factor is the size of that set.

Examples:
  bf keys                          # current repository
  bf keys ../service --top 10
  bf keys --registry team.json     # merge aliases and flag bots
  bf keys --activity events.json   # add issue-tracker activity
  bf keys --json                   # full report";

/// Collaboration graph export.
pub const GRAPH: &str = "\
Print the collaboration graph as node-link JSON.

Two contributors are connected when both touched at least one file inside
the recency window; the edge weight is the number of such files.

Output:
  {\"nodes\": [{\"id\": name, \"size\": score, \"class\": 1 | 2}],
   \"edges\": [{\"source\": name, \"target\": name, \"weight\": files}]}

class 1 marks key contributors, class 2 everyone else. Activity-only
contributors appear as isolated nodes.";

/// Contribution shares of the key contributors.
pub const SHARES: &str = "\
Show what share of each file the key contributors wrote.

For every file a key contributor touched inside the recency window:
  share = 100 * lines changed by the contributor / lines changed by everyone

rounded to two decimals. The Lines column is the file's current size at
HEAD (\"-\" when the file no longer exists).";
