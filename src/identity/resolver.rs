use std::collections::{BTreeMap, HashMap, HashSet};

use super::{Contributor, RawIdentity, canonical_key, has_bot_marker, non_blank};
use crate::anomaly::Anomaly;

/// Resolved identity table for one run.
///
/// Commit authors are mapped to a handle through the registry (email first,
/// then display name, then the raw author name), and handles are grouped by
/// canonical key. Each group keeps one representative name, unique across
/// the table.
#[derive(Debug, Default)]
pub struct Identities {
    email_to_login: HashMap<String, String>,
    name_to_login: HashMap<String, String>,
    bot_logins: HashSet<String>,
    contributors: BTreeMap<String, Contributor>,
}

#[derive(Default)]
struct Group {
    /// variant -> number of commits authored under it
    variants: BTreeMap<String, usize>,
    is_bot: bool,
}

impl Identities {
    /// Build the identity table from the registry and the `(name, email)`
    /// author pair of every commit inside the analysed window.
    pub fn resolve<'a, I>(registry: &[RawIdentity], authors: I) -> (Self, Vec<Anomaly>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut anomalies = Vec::new();
        let mut ids = Identities::default();
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();

        for (idx, entry) in registry.iter().enumerate() {
            let Some(handle) = entry.handle() else {
                Anomaly::unresolvable(
                    "registry",
                    format!("entry #{idx} has no login, name or email"),
                )
                .record(&mut anomalies);
                continue;
            };
            let Some(key) = identity_key(handle, entry.email.as_deref()) else {
                Anomaly::unresolvable("registry", format!("{handle:?} has no alphanumeric characters"))
                    .record(&mut anomalies);
                continue;
            };

            if let Some(email) = non_blank(entry.email.as_deref()) {
                ids.email_to_login
                    .insert(email.to_string(), handle.to_string());
            }
            if let Some(name) = non_blank(entry.name.as_deref()) {
                ids.name_to_login.insert(name.to_string(), handle.to_string());
            }
            if entry.is_bot() {
                ids.bot_logins.insert(handle.to_string());
            }

            let group = groups.entry(key).or_default();
            group.variants.entry(handle.to_string()).or_insert(0);
            group.is_bot |= entry.is_bot();
        }

        let mut reported: HashSet<(&str, &str)> = HashSet::new();
        for (name, email) in authors {
            let key = ids
                .author_handle(name, email)
                .and_then(|h| identity_key(&h, Some(email)).map(|k| (h, k)));
            let Some((handle, key)) = key else {
                if reported.insert((name, email)) {
                    Anomaly::unresolvable(
                        "history",
                        format!("commit author name={name:?} email={email:?}"),
                    )
                    .record(&mut anomalies);
                }
                continue;
            };

            let group = groups.entry(key).or_default();
            group.is_bot |= ids.is_bot_handle(&handle);
            *group.variants.entry(handle).or_insert(0) += 1;
        }

        for (key, group) in groups {
            let Some(representative) = pick_representative(&group.variants) else {
                continue;
            };
            let contributor = Contributor {
                canonical_key: key.clone(),
                representative_name: representative.to_string(),
                is_bot: group.is_bot,
                is_activity_only: false,
            };
            ids.contributors.insert(key, contributor);
        }
        ids.disambiguate_names();

        tracing::debug!(
            contributors = ids.contributors.len(),
            bots = ids.contributors.values().filter(|c| c.is_bot).count(),
            "identities resolved"
        );

        (ids, anomalies)
    }

    /// Map a commit author to a handle: registry login by email, then by
    /// display name, then the raw author name (or email when the name is
    /// blank). `None` when both name and email are blank.
    pub fn author_handle(&self, name: &str, email: &str) -> Option<String> {
        let email = non_blank(Some(email));
        let name = non_blank(Some(name));

        if let Some(login) = email.and_then(|e| self.email_to_login.get(e)) {
            return Some(login.clone());
        }
        if let Some(login) = name.and_then(|n| self.name_to_login.get(n)) {
            return Some(login.clone());
        }
        name.or(email).map(str::to_string)
    }

    /// Canonical key for a commit author, using the same fallbacks as
    /// [`Identities::resolve`].
    pub fn key_for_author(&self, name: &str, email: &str) -> Option<String> {
        self.author_handle(name, email)
            .and_then(|h| identity_key(&h, Some(email)))
    }

    /// Registry bots by login; anyone else only with an explicit marker.
    pub fn is_bot_handle(&self, handle: &str) -> bool {
        self.bot_logins.contains(handle) || has_bot_marker(handle)
    }

    pub fn is_bot(&self, key: &str) -> bool {
        self.contributors.get(key).is_some_and(|c| c.is_bot)
    }

    /// Record a contributor known only from the activity feed. A
    /// registry entry with the same key keeps its representative name.
    pub fn add_activity_only(&mut self, key: &str, name: &str) -> &Contributor {
        let contributor = self
            .contributors
            .entry(key.to_string())
            .or_insert_with(|| Contributor {
                canonical_key: key.to_string(),
                representative_name: name.to_string(),
                is_bot: has_bot_marker(name),
                is_activity_only: true,
            });
        contributor.is_activity_only = true;
        contributor
    }

    pub fn contributor(&self, key: &str) -> Option<&Contributor> {
        self.contributors.get(key)
    }

    pub fn representative(&self, key: &str) -> Option<&str> {
        self.contributor(key)
            .map(|c| c.representative_name.as_str())
    }

    pub fn contributors(&self) -> impl Iterator<Item = &Contributor> {
        self.contributors.values()
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Names without ASCII alphanumerics are keyed by email, so two people
    /// can share one. Every clashing name gets its key appended; the result
    /// canonicalizes back to that key and cannot clash again.
    fn disambiguate_names(&mut self) {
        let mut uses: HashMap<String, usize> = HashMap::new();
        for c in self.contributors.values() {
            *uses.entry(c.representative_name.clone()).or_insert(0) += 1;
        }
        for c in self.contributors.values_mut() {
            if uses.get(&c.representative_name).is_some_and(|&n| n > 1) {
                tracing::debug!(
                    name = %c.representative_name,
                    key = %c.canonical_key,
                    "representative name shared by several keys"
                );
                c.representative_name = format!("{} ({})", c.representative_name, c.canonical_key);
            }
        }
    }
}

/// Canonical key of a handle; handles without ASCII alphanumerics (e.g.
/// names written only in non-Latin scripts) fall back to the email.
fn identity_key(handle: &str, email: Option<&str>) -> Option<String> {
    let key = canonical_key(handle);
    if !key.is_empty() {
        return Some(key);
    }
    let key = canonical_key(email.unwrap_or_default());
    (!key.is_empty()).then_some(key)
}

/// Variant with the most commits; ties go to the lexicographically
/// smallest variant.
fn pick_representative(variants: &BTreeMap<String, usize>) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (variant, &commits) in variants {
        if best.is_none_or(|(_, most)| commits > most) {
            best = Some((variant, commits));
        }
    }
    best.map(|(variant, _)| variant)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
