/// Reduce an identity string to its canonical grouping key: every
/// character outside `[A-Za-z0-9]` is dropped and the rest lower-cased.
///
/// `"J.Doe-42"` and `"jdoe42"` both map to `"jdoe42"`. Strings made only
/// of punctuation or non-ASCII letters map to the empty key.
pub fn canonical_key(identity: &str) -> String {
    identity
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Substring bot heuristic for registry logins.
pub fn looks_like_bot(handle: &str) -> bool {
    handle.to_lowercase().contains("bot")
}

/// Stricter rule for names the registry does not know: a `[bot]` suffix
/// or `bot` as a standalone word (`renovate-bot`, `CI Bot`). A surname
/// like "Talbot" is not a marker.
pub fn has_bot_marker(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    name.ends_with("[bot]")
        || name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == "bot")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
