use std::error::Error;
use std::time::Duration;

use serde::Deserialize;

use super::{ActivityEvent, ActivitySource, ActivityTally};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const PAGE_SIZE: usize = 100;
const MAX_ISSUES: usize = 1000;
const FIELDS: &str = "reporter,assignee,comment";

/// Jira Cloud/Server issue search, authenticated with an email and API
/// token. Each issue yields one reporter/assignee event plus one event
/// per comment author.
pub struct JiraSource {
    server: String,
    email: String,
    api_token: String,
    project: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Deserialize, Debug, Default)]
struct Issue {
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Deserialize, Debug, Default)]
struct IssueFields {
    reporter: Option<JiraUser>,
    assignee: Option<JiraUser>,
    comment: Option<CommentPage>,
}

#[derive(Deserialize, Debug, Default)]
struct CommentPage {
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Deserialize, Debug)]
struct Comment {
    author: Option<JiraUser>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JiraUser {
    display_name: Option<String>,
}

fn display_name(user: &Option<JiraUser>) -> Option<String> {
    user.as_ref().and_then(|u| u.display_name.clone())
}

fn issue_events(issue: &Issue) -> Vec<ActivityEvent> {
    let fields = &issue.fields;
    let mut events = vec![ActivityEvent {
        reporter: display_name(&fields.reporter),
        assignee: display_name(&fields.assignee),
        commenter: None,
    }];
    if let Some(page) = &fields.comment {
        events.extend(page.comments.iter().map(|c| ActivityEvent {
            commenter: display_name(&c.author),
            ..ActivityEvent::default()
        }));
    }
    events
}

impl JiraSource {
    pub fn new(server: &str, email: &str, api_token: &str, project: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_token: api_token.to_string(),
            project: project.to_string(),
        }
    }

    /// Credentials from `JIRA_SERVER`, `JIRA_EMAIL` and `JIRA_API_TOKEN`.
    pub fn from_env(project: &str) -> Result<Self, Box<dyn Error>> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| format!("{name} environment variable not set"))
        };
        Ok(Self::new(
            &var("JIRA_SERVER")?,
            &var("JIRA_EMAIL")?,
            &var("JIRA_API_TOKEN")?,
            project,
        ))
    }

    fn jql(&self) -> String {
        format!(
            "project = \"{}\" ORDER BY updated DESC",
            self.project.replace('"', "\\\"")
        )
    }

    fn fetch_events(&self) -> Result<Vec<ActivityEvent>, Box<dyn Error>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let url = format!("{}/rest/api/2/search", self.server);
        let jql = self.jql();

        let mut events = Vec::new();
        let mut start_at = 0;
        while start_at < MAX_ISSUES {
            let query = [
                ("jql", jql.clone()),
                ("startAt", start_at.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("fields", FIELDS.to_string()),
            ];
            let resp = client
                .get(&url)
                .basic_auth(&self.email, Some(&self.api_token))
                .header("accept", "application/json")
                .query(&query)
                .send()?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().unwrap_or_default();
                return Err(format!("Jira API error ({status}): {body}").into());
            }

            let page: SearchResponse = resp.json()?;
            let fetched = page.issues.len();
            events.extend(page.issues.iter().flat_map(issue_events));
            start_at += fetched;
            if fetched == 0 || start_at >= page.total {
                break;
            }
        }

        tracing::debug!(project = %self.project, issues = start_at, "jira issues fetched");
        Ok(events)
    }
}

impl ActivitySource for JiraSource {
    fn name(&self) -> &str {
        "jira"
    }

    fn activity(&self) -> Result<ActivityTally, Box<dyn Error>> {
        Ok(ActivityTally::from_events(&self.fetch_events()?))
    }
}

#[cfg(test)]
#[path = "jira_test.rs"]
mod tests;
