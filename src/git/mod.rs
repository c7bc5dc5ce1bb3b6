use std::error::Error;
use std::path::{Path, PathBuf};

use git2::{DiffOptions, ErrorCode, Oid, Patch, Repository, Sort};

use crate::history;

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

/// Lines added and removed in one file by one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl FileChange {
    pub fn lines(&self) -> usize {
        self.insertions + self.deletions
    }
}

/// A commit as read from history, before identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub author_name: String,
    pub author_email: String,
    /// Commit time, seconds since the Unix epoch.
    pub time: i64,
    pub files: Vec<FileChange>,
}

impl RawCommit {
    pub fn insertions(&self) -> usize {
        self.files.iter().map(|f| f.insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }
}

impl GitRepo {
    /// Open the repository containing `path`. Bare clones are accepted.
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let repo = Repository::discover(path)?;
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk history from HEAD, newest first, with per-file line stats for
    /// the commits inside the last `window_days` before the newest one.
    ///
    /// The walk itself is cheap: only commits at or after the cutoff are
    /// diffed. Every commit is checked, so out-of-order timestamps do not
    /// cut the walk short. Merge commits are skipped unless
    /// `include_merges` is set; when included they are diffed against
    /// their first parent. An unborn HEAD yields an empty history.
    pub fn commit_history(
        &self,
        include_merges: bool,
        window_days: u32,
    ) -> Result<Vec<RawCommit>, Box<dyn Error>> {
        if let Err(e) = self.repo.head()
            && matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
        {
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TIME)?;

        let mut walked: Vec<(Oid, i64)> = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() > 1 && !include_merges {
                continue;
            }
            walked.push((oid, commit.time().seconds()));
        }

        let Some(latest) = walked.iter().map(|&(_, time)| time).max() else {
            return Ok(Vec::new());
        };
        let cutoff = history::cutoff(latest, window_days);

        let mut result = Vec::new();
        for &(oid, time) in walked.iter().filter(|&&(_, time)| time >= cutoff) {
            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();
            result.push(RawCommit {
                author_name: author.name().unwrap_or_default().to_string(),
                author_email: author.email().unwrap_or_default().to_string(),
                time,
                files: self.file_changes(&commit)?,
            });
        }

        tracing::debug!(
            walked = walked.len(),
            diffed = result.len(),
            "commit history read"
        );
        Ok(result)
    }

    /// Number of lines in `rel_path` at HEAD. `None` when the file is gone,
    /// is not UTF-8 text, or HEAD cannot be read.
    pub fn line_count_at_head(&self, rel_path: &str) -> Option<usize> {
        let tree = self.repo.head().ok()?.peel_to_tree().ok()?;
        let entry = tree.get_path(Path::new(rel_path)).ok()?;
        let blob = entry.to_object(&self.repo).ok()?.peel_to_blob().ok()?;
        let content = std::str::from_utf8(blob.content()).ok()?;
        Some(content.lines().count())
    }

    fn file_changes(&self, commit: &git2::Commit) -> Result<Vec<FileChange>, Box<dyn Error>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.context_lines(0);
        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        let mut changes = Vec::new();
        for idx in 0..diff.deltas().len() {
            let Some(patch) = Patch::from_diff(&diff, idx)? else {
                continue;
            };
            let delta = patch.delta();
            let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
                continue;
            };
            let (_, insertions, deletions) = patch.line_stats()?;
            changes.push(FileChange {
                path: path.to_string_lossy().into_owned(),
                insertions,
                deletions,
            });
        }
        Ok(changes)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
