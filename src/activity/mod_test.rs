use super::*;
use std::io::Write;

fn event(reporter: Option<&str>, assignee: Option<&str>, commenter: Option<&str>) -> ActivityEvent {
    ActivityEvent {
        reporter: reporter.map(str::to_string),
        assignee: assignee.map(str::to_string),
        commenter: commenter.map(str::to_string),
    }
}

#[test]
fn counts_by_canonical_key() {
    let events = vec![
        event(Some("Grace"), None, None),
        event(None, Some("grace"), None),
        event(None, None, Some("G.race")),
    ];
    let tally = ActivityTally::from_events(&events);
    assert_eq!(tally.count("grace"), 3);
    assert_eq!(tally.counts.len(), 1);
    // smallest variant in byte order
    assert_eq!(tally.counts["grace"].name, "G.race");
}

#[test]
fn same_person_twice_on_one_event_counts_once() {
    let tally = ActivityTally::from_events(&[event(Some("Alice"), Some("alice"), None)]);
    assert_eq!(tally.count("alice"), 1);
}

#[test]
fn distinct_people_on_one_event_each_count() {
    let tally = ActivityTally::from_events(&[event(Some("Alice"), Some("Bob"), Some("Carol"))]);
    assert_eq!(tally.count("alice"), 1);
    assert_eq!(tally.count("bob"), 1);
    assert_eq!(tally.count("carol"), 1);
}

#[test]
fn malformed_events_are_skipped_and_recorded() {
    let events = vec![
        event(None, None, None),
        event(Some("  "), None, Some("")),
        event(Some("Alice"), None, None),
    ];
    let tally = ActivityTally::from_events(&events);
    assert_eq!(tally.count("alice"), 1);
    assert_eq!(
        tally.anomalies,
        vec![
            Anomaly::MalformedActivityRecord { index: 0 },
            Anomaly::MalformedActivityRecord { index: 1 },
        ]
    );
}

#[test]
fn punctuation_only_name_is_unresolvable() {
    let tally = ActivityTally::from_events(&[event(Some("???"), None, None)]);
    assert!(tally.is_empty());
    assert!(matches!(
        tally.anomalies[0],
        Anomaly::UnresolvableIdentity { .. }
    ));
}

#[test]
fn file_source_reads_json_events() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"reporter": "Grace"}}, {{"assignee": "Grace", "commenter": "Bob"}}]"#
    )
    .unwrap();

    let source = FileActivitySource::new(file.path());
    let tally = collect(&[&source]);
    assert_eq!(tally.count("grace"), 2);
    assert_eq!(tally.count("bob"), 1);
    assert!(tally.anomalies.is_empty());
}

#[test]
fn failing_source_degrades_to_empty() {
    let source = FileActivitySource::new(Path::new("/nonexistent/activity.json"));
    let tally = collect(&[&source]);
    assert!(tally.is_empty());
    assert!(matches!(
        tally.anomalies[0],
        Anomaly::ExternalSourceUnavailable { .. }
    ));
}

#[test]
fn no_source_is_empty() {
    let tally = collect(&[]);
    assert!(tally.is_empty());
    assert!(tally.anomalies.is_empty());
}

#[test]
fn merge_adds_counts() {
    let mut a = ActivityTally::from_events(&[event(Some("grace"), None, None)]);
    let b = ActivityTally::from_events(&[
        event(Some("Grace"), None, None),
        event(Some("Bob"), None, None),
        event(None, None, None),
    ]);
    a.merge(b);
    assert_eq!(a.count("grace"), 2);
    assert_eq!(a.counts["grace"].name, "Grace");
    assert_eq!(a.count("bob"), 1);
    assert_eq!(a.anomalies.len(), 1);
}

#[test]
fn retain_humans_drops_bots() {
    let mut tally = ActivityTally::from_events(&[
        event(Some("renovate-bot"), Some("Alice"), None),
    ]);
    tally.retain_humans(|_, count| crate::identity::has_bot_marker(&count.name));
    assert_eq!(tally.count("alice"), 1);
    assert_eq!(tally.count("renovatebot"), 0);
}
