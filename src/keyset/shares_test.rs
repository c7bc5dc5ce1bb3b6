use super::*;
use proptest::prelude::*;

fn map(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn alice_and_bob_split_a_py() {
    let all = map(&[("a.py", 13), ("b.py", 5)]);
    let per = BTreeMap::from([
        ("alice".to_string(), map(&[("a.py", 10), ("b.py", 5)])),
        ("bob".to_string(), map(&[("a.py", 3)])),
    ]);
    let keys = vec!["alice".to_string(), "bob".to_string()];
    let shares = contribution_shares(&all, &per, &keys);

    assert_eq!(shares["alice"]["a.py"], 76.92);
    assert_eq!(shares["alice"]["b.py"], 100.0);
    assert_eq!(shares["bob"]["a.py"], 23.08);
}

#[test]
fn only_key_contributors_appear() {
    let all = map(&[("a.py", 2)]);
    let per = BTreeMap::from([
        ("alice".to_string(), map(&[("a.py", 1)])),
        ("bob".to_string(), map(&[("a.py", 1)])),
    ]);
    let shares = contribution_shares(&all, &per, &["alice".to_string()]);
    assert_eq!(shares.len(), 1);
    assert_eq!(shares["alice"]["a.py"], 50.0);
}

#[test]
fn zero_total_is_zero_percent() {
    let all = map(&[("empty.txt", 0)]);
    let per = BTreeMap::from([("alice".to_string(), map(&[("empty.txt", 0)]))]);
    let shares = contribution_shares(&all, &per, &["alice".to_string()]);
    assert_eq!(shares["alice"]["empty.txt"], 0.0);
}

#[test]
fn key_without_files_gets_empty_map() {
    let shares = contribution_shares(&BTreeMap::new(), &BTreeMap::new(), &["grace".to_string()]);
    assert!(shares["grace"].is_empty());
}

#[test]
fn rounding() {
    assert_eq!(round2(33.333), 33.33);
    assert_eq!(round2(66.666), 66.67);
    assert_eq!(round2(100.0), 100.0);
}

proptest! {
    #[test]
    fn shares_of_one_file_sum_to_at_most_100(
        lines in proptest::collection::vec(0usize..500, 1..8),
    ) {
        let total: usize = lines.iter().sum();
        let all = map(&[("f.rs", total)]);
        let per: BTreeMap<String, BTreeMap<String, usize>> = lines
            .iter()
            .enumerate()
            .map(|(i, &n)| (format!("c{i}"), map(&[("f.rs", n)])))
            .collect();
        let keys: Vec<String> = per.keys().cloned().collect();
        let shares = contribution_shares(&all, &per, &keys);

        let sum: f64 = shares.values().map(|files| files["f.rs"]).sum();
        // each share rounds by at most 0.005
        prop_assert!(sum <= 100.0 + 0.005 * lines.len() as f64 + 1e-9);
        for files in shares.values() {
            prop_assert!((0.0..=100.0).contains(&files["f.rs"]));
        }
    }
}
