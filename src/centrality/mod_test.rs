use super::*;
use crate::activity::ActivityEvent;
use crate::git::{FileChange, RawCommit};
use crate::history::aggregate;
use crate::progress::Silent;

fn commit(author: &str, files: &[(&str, usize)]) -> RawCommit {
    RawCommit {
        author_name: author.to_string(),
        author_email: String::new(),
        time: 1_700_000_000,
        files: files
            .iter()
            .map(|(path, lines)| FileChange {
                path: path.to_string(),
                insertions: *lines,
                deletions: 0,
            })
            .collect(),
    }
}

fn setup(history: &[RawCommit]) -> (Identities, HistoryAggregate, CollaborationGraph) {
    let (ids, _) = Identities::resolve(
        &[],
        history
            .iter()
            .map(|c| (c.author_name.as_str(), c.author_email.as_str())),
    );
    let agg = aggregate(history, &ids, 30, &Silent);
    let graph = CollaborationGraph::build(&agg.commits, &ids).unwrap();
    (ids, agg, graph)
}

fn reported_by(names: &[&str]) -> ActivityTally {
    let events: Vec<ActivityEvent> = names
        .iter()
        .map(|n| ActivityEvent {
            reporter: Some(n.to_string()),
            ..ActivityEvent::default()
        })
        .collect();
    ActivityTally::from_events(&events)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn composite_score_terms() {
    let history = vec![
        commit("Alice", &[("a.py", 10)]),
        commit("Alice", &[("b.py", 5)]),
        commit("Bob", &[("a.py", 3)]),
    ];
    let (mut ids, agg, mut graph) = setup(&history);
    let scores = score(
        &mut graph,
        &agg,
        &ActivityTally::default(),
        &mut ids,
        ScoreWeights::default(),
    );

    // alice: 1 + 0.5 * 15/15 + 0.5 * 2/2
    assert!(close(scores["alice"].score, 2.0));
    // bob: 1 + 0.5 * 3/15 + 0.5 * 1/2
    assert!(close(scores["bob"].score, 1.35));
    assert_eq!(scores["alice"].name, "Alice");
    assert_eq!(scores["alice"].degree, 1);
}

#[test]
fn activity_adds_weighted_term_for_graph_nodes() {
    let history = vec![commit("Alice", &[("a.py", 4)]), commit("Bob", &[("a.py", 4)])];
    let (mut ids, agg, mut graph) = setup(&history);
    let activity = reported_by(&["alice", "Alice", "ALICE"]);
    let scores = score(&mut graph, &agg, &activity, &mut ids, ScoreWeights::default());

    assert_eq!(scores["alice"].activity, 3);
    assert!(close(
        scores["alice"].score - scores["bob"].score,
        3.0 * DEFAULT_ACTIVITY_WEIGHT
    ));
    assert!(!scores["alice"].is_activity_only);
}

#[test]
fn activity_only_contributor_is_isolated_with_small_weight() {
    let history = vec![commit("Alice", &[("a.py", 4)]), commit("Bob", &[("a.py", 4)])];
    let (mut ids, agg, mut graph) = setup(&history);
    let before = score(
        &mut CollaborationGraph::build(&agg.commits, &ids).unwrap(),
        &agg,
        &ActivityTally::default(),
        &mut ids,
        ScoreWeights::default(),
    );

    let activity = reported_by(&["Grace", "Grace", "Grace", "Grace"]);
    let scores = score(&mut graph, &agg, &activity, &mut ids, ScoreWeights::default());

    let grace = &scores["grace"];
    assert!(grace.is_activity_only);
    assert_eq!(grace.name, "Grace");
    assert!(close(grace.score, 4.0 * DEFAULT_ACTIVITY_ONLY_WEIGHT));
    assert_eq!(grace.degree_centrality, 0.0);

    assert!(graph.contains("grace"));
    assert_eq!(graph.degree("grace"), 0);
    assert!(graph.node("grace").unwrap().is_activity_only);

    // graph-based scores are untouched by the extra node
    assert!(close(scores["alice"].score, before["alice"].score));
    assert!(close(scores["bob"].score, before["bob"].score));
}

#[test]
fn custom_weights_apply() {
    let (mut ids, agg, mut graph) = setup(&[commit("Alice", &[("a.py", 1)])]);
    let weights = ScoreWeights {
        activity_weight: 1.0,
        activity_only_weight: 0.5,
    };
    let scores = score(&mut graph, &agg, &reported_by(&["Alice", "Zoe"]), &mut ids, weights);
    // lone node: 1 + 0.5 + 0.5 + 1.0
    assert!(close(scores["alice"].score, 3.0));
    assert!(close(scores["zoe"].score, 0.5));
}

#[test]
fn score_is_monotone_in_loc_and_files() {
    let base = vec![
        commit("Alice", &[("a.py", 10)]),
        commit("Bob", &[("a.py", 5)]),
        commit("Carol", &[("a.py", 20), ("c.py", 1)]),
    ];
    let (mut ids, agg, mut graph) = setup(&base);
    let before = score(&mut graph, &agg, &ActivityTally::default(), &mut ids, ScoreWeights::default());

    let mut more = base.clone();
    more.push(commit("Bob", &[("a.py", 4), ("b.py", 1)]));
    let (mut ids, agg, mut graph) = setup(&more);
    let after = score(&mut graph, &agg, &ActivityTally::default(), &mut ids, ScoreWeights::default());

    assert!(after["bob"].score > before["bob"].score);
}

#[test]
fn every_node_is_scored() {
    let history = vec![
        commit("Alice", &[("a.py", 1)]),
        commit("Bob", &[("b.py", 1)]),
        commit("Carol", &[("c.py", 1)]),
    ];
    let (mut ids, agg, mut graph) = setup(&history);
    let scores = score(&mut graph, &agg, &reported_by(&["Dan"]), &mut ids, ScoreWeights::default());
    assert_eq!(scores.len(), graph.node_count());
    assert!(scores.values().all(|s| s.score >= 0.0));
}

#[test]
fn empty_graph_without_activity_has_no_scores() {
    let (mut ids, agg, mut graph) = setup(&[]);
    let scores = score(&mut graph, &agg, &ActivityTally::default(), &mut ids, ScoreWeights::default());
    assert!(scores.is_empty());
}
