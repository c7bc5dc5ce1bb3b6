use std::error::Error;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use super::RegistrySource;
use crate::identity::{AccountKind, RawIdentity};
use crate::progress::{PercentTicker, Progress};

const API_URL: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const PAGE_SIZE: usize = 100;
const USER_AGENT: &str = concat!("busfactor/", env!("CARGO_PKG_VERSION"));

/// Contributors of a GitHub repository, with profile name and public email
/// looked up per login.
pub struct GithubRegistry {
    owner: String,
    repo: String,
    token: Option<String>,
    api_url: String,
}

#[derive(Deserialize, Debug)]
struct ContributorEntry {
    login: Option<String>,
    #[serde(default, rename = "type")]
    kind: AccountKind,
}

#[derive(Deserialize, Debug, Default)]
struct UserProfile {
    name: Option<String>,
    email: Option<String>,
}

/// Accept `owner/repo`, `https://github.com/owner/repo(.git)` or
/// `git@github.com:owner/repo.git`.
pub fn parse_repo_slug(input: &str) -> Result<(String, String), String> {
    let trimmed = input.trim().trim_end_matches('/');
    let path = trimmed
        .strip_prefix("https://github.com/")
        .or_else(|| trimmed.strip_prefix("http://github.com/"))
        .or_else(|| trimmed.strip_prefix("git@github.com:"))
        .unwrap_or(trimmed);
    let path = path.strip_suffix(".git").unwrap_or(path);

    match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(format!(
            "invalid GitHub repository {input:?}: expected OWNER/REPO"
        )),
    }
}

impl GithubRegistry {
    /// Token is read from `GITHUB_TOKEN` when set; anonymous requests work
    /// for public repositories under a lower rate limit.
    pub fn new(slug: &str) -> Result<Self, String> {
        let (owner, repo) = parse_repo_slug(slug)?;
        Ok(Self {
            owner,
            repo,
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            api_url: API_URL.to_string(),
        })
    }

    fn get(&self, client: &Client, url: &str) -> Result<Response, Box<dyn Error>> {
        let mut req = client
            .get(url)
            .header("accept", "application/vnd.github+json")
            .header("user-agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(format!("GitHub API error ({status}): {body}").into());
        }
        Ok(resp)
    }

    fn contributors(&self, client: &Client) -> Result<Vec<ContributorEntry>, Box<dyn Error>> {
        let mut all = Vec::new();
        for page in 1.. {
            let url = format!(
                "{}/repos/{}/{}/contributors?per_page={PAGE_SIZE}&page={page}",
                self.api_url, self.owner, self.repo
            );
            let batch: Vec<ContributorEntry> = self.get(client, &url)?.json()?;
            let fetched = batch.len();
            all.extend(batch);
            if fetched < PAGE_SIZE {
                break;
            }
        }
        Ok(all)
    }

    fn profile(&self, client: &Client, login: &str) -> UserProfile {
        let url = format!("{}/users/{login}", self.api_url);
        match self.get(client, &url).and_then(|r| Ok(r.json::<UserProfile>()?)) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!(login, error = %e, "profile lookup failed");
                UserProfile::default()
            }
        }
    }
}

impl RegistrySource for GithubRegistry {
    fn name(&self) -> &str {
        "github"
    }

    fn identities(&self, progress: &dyn Progress) -> Result<Vec<RawIdentity>, Box<dyn Error>> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        progress.update("Fetch all contributors for the project...");
        let contributors = self.contributors(&client)?;

        let ticker = PercentTicker::new(
            progress,
            "Fetch all contributors for the project",
            contributors.len(),
        );
        let mut identities = Vec::with_capacity(contributors.len());
        for (i, entry) in contributors.into_iter().enumerate() {
            ticker.tick(i + 1);
            // anonymous contributors have no login
            let Some(login) = entry.login else {
                continue;
            };
            let profile = self.profile(&client, &login);
            identities.push(RawIdentity {
                login,
                email: profile.email,
                name: profile.name,
                kind: entry.kind,
            });
        }
        Ok(identities)
    }
}

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;
