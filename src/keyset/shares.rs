use std::collections::BTreeMap;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// For each key contributor, the percentage of every touched file's
/// changed lines that the contributor wrote. A file whose total is zero
/// gets 0.
pub fn contribution_shares(
    all_files: &BTreeMap<String, usize>,
    per_contributor: &BTreeMap<String, BTreeMap<String, usize>>,
    key_contributors: &[String],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    key_contributors
        .iter()
        .map(|key| {
            let files = per_contributor
                .get(key)
                .map(|files| {
                    files
                        .iter()
                        .map(|(path, &lines)| {
                            let total = all_files.get(path).copied().unwrap_or(0);
                            let pct = if total == 0 {
                                0.0
                            } else {
                                round2(lines as f64 / total as f64 * 100.0)
                            };
                            (path.clone(), pct)
                        })
                        .collect()
                })
                .unwrap_or_default();
            (key.clone(), files)
        })
        .collect()
}

#[cfg(test)]
#[path = "shares_test.rs"]
mod tests;
