use super::*;

const SEARCH_PAGE: &str = r#"{
  "startAt": 0,
  "maxResults": 100,
  "total": 2,
  "issues": [
    {
      "key": "TH-1",
      "fields": {
        "reporter": {"displayName": "Grace Hopper"},
        "assignee": {"displayName": "Alice"},
        "comment": {"comments": [
          {"author": {"displayName": "Bob"}},
          {"author": null}
        ]}
      }
    },
    {
      "key": "TH-2",
      "fields": {"reporter": {"displayName": "Grace Hopper"}, "assignee": null}
    }
  ]
}"#;

#[test]
fn parses_search_page() {
    let page: SearchResponse = serde_json::from_str(SEARCH_PAGE).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.issues.len(), 2);
}

#[test]
fn issue_yields_reporter_assignee_and_comment_events() {
    let page: SearchResponse = serde_json::from_str(SEARCH_PAGE).unwrap();
    let events = issue_events(&page.issues[0]);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].reporter.as_deref(), Some("Grace Hopper"));
    assert_eq!(events[0].assignee.as_deref(), Some("Alice"));
    assert_eq!(events[1].commenter.as_deref(), Some("Bob"));
    assert_eq!(events[2], ActivityEvent::default());
}

#[test]
fn tally_from_search_page() {
    let page: SearchResponse = serde_json::from_str(SEARCH_PAGE).unwrap();
    let events: Vec<ActivityEvent> = page.issues.iter().flat_map(issue_events).collect();
    let tally = ActivityTally::from_events(&events);

    assert_eq!(tally.count("gracehopper"), 2);
    assert_eq!(tally.count("alice"), 1);
    assert_eq!(tally.count("bob"), 1);
    // the comment without an author
    assert_eq!(tally.anomalies.len(), 1);
}

#[test]
fn jql_quotes_project() {
    let source = JiraSource::new("https://example.atlassian.net/", "me@x.com", "t", "TH");
    assert_eq!(source.jql(), "project = \"TH\" ORDER BY updated DESC");
    assert_eq!(source.server, "https://example.atlassian.net");
    assert_eq!(source.name(), "jira");
}

#[test]
fn unreachable_server_is_an_error() {
    let source = JiraSource::new("http://127.0.0.1:9", "me@x.com", "t", "TH");
    assert!(source.activity().is_err());
}
