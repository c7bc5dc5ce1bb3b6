use super::*;
use proptest::prelude::*;

fn scores(entries: &[(&str, f64)]) -> Scores {
    entries
        .iter()
        .map(|(key, score)| {
            (
                key.to_string(),
                ContributorScore {
                    key: key.to_string(),
                    name: key.to_string(),
                    degree: 0,
                    degree_centrality: 0.0,
                    loc: 0,
                    files: 0,
                    activity: 0,
                    score: *score,
                    is_activity_only: false,
                },
            )
        })
        .collect()
}

#[test]
fn stops_once_threshold_reached() {
    let s = scores(&[("a", 5.0), ("b", 3.0), ("c", 2.0)]);
    assert_eq!(select(&s, 0.3), vec!["a"]);
    assert_eq!(select(&s, 0.6), vec!["a", "b"]);
    assert_eq!(select(&s, 0.75), vec!["a", "b"]);
    assert_eq!(select(&s, 1.0), vec!["a", "b", "c"]);
}

#[test]
fn exact_threshold_hit_stops() {
    let s = scores(&[("a", 2.0), ("b", 2.0), ("c", 4.0)]);
    assert_eq!(select(&s, 0.5), vec!["c"]);
}

#[test]
fn ties_broken_by_key() {
    let s = scores(&[("zed", 1.0), ("amy", 1.0), ("max", 1.0)]);
    let ranked: Vec<&str> = rank(&s).iter().map(|e| e.key.as_str()).collect();
    assert_eq!(ranked, ["amy", "max", "zed"]);
    assert_eq!(select(&s, 0.5), vec!["amy", "max"]);
}

#[test]
fn zero_total_keeps_first_ranked() {
    let s = scores(&[("b", 0.0), ("a", 0.0)]);
    assert_eq!(select(&s, 0.3), vec!["a"]);
}

#[test]
fn no_scores_no_keys() {
    assert!(select(&Scores::new(), 0.3).is_empty());
}

#[test]
fn node_class_codes() {
    let keys = vec!["alice".to_string()];
    assert_eq!(NodeClass::of("alice", &keys).code(), 1);
    assert_eq!(NodeClass::of("bob", &keys).code(), 2);
}

proptest! {
    #[test]
    fn key_set_contains_top_and_reaches_threshold(
        values in proptest::collection::vec(0.0f64..10.0, 1..20),
        threshold in 0.01f64..=1.0,
    ) {
        let names: Vec<String> = (0..values.len()).map(|i| format!("c{i:02}")).collect();
        let entries: Vec<(&str, f64)> = names
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect();
        let s = scores(&entries);
        let keys = select(&s, threshold);

        prop_assert!(!keys.is_empty());
        prop_assert_eq!(&keys[0], &rank(&s)[0].key);

        let total: f64 = values.iter().sum();
        let mass: f64 = keys.iter().map(|k| s[k].score).sum();
        if keys.len() < values.len() {
            prop_assert!(mass + 1e-9 >= threshold * total);
        }
    }
}
