//! Contributor identities: canonical keys, registry entries and the
//! resolver that merges author aliases into one contributor per key.

mod normalize;
pub mod resolver;

use serde::Deserialize;

pub use normalize::{canonical_key, has_bot_marker, looks_like_bot};
pub use resolver::Identities;

/// Account kind as reported by the contributor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum AccountKind {
    Human,
    Bot,
    #[default]
    Unknown,
}

impl From<String> for AccountKind {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "bot" => AccountKind::Bot,
            "user" | "human" => AccountKind::Human,
            _ => AccountKind::Unknown,
        }
    }
}

/// One identity known to the contributor registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawIdentity {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: AccountKind,
}

impl RawIdentity {
    pub fn new(login: &str, kind: AccountKind) -> Self {
        Self {
            login: login.to_string(),
            email: None,
            name: None,
            kind,
        }
    }

    /// The display handle: login, falling back to display name, then email.
    pub fn handle(&self) -> Option<&str> {
        non_blank(Some(self.login.as_str()))
            .or_else(|| non_blank(self.name.as_deref()))
            .or_else(|| non_blank(self.email.as_deref()))
    }

    pub fn is_bot(&self) -> bool {
        self.kind == AccountKind::Bot || looks_like_bot(&self.login)
    }
}

/// A merged contributor: every identity variant sharing one canonical key.
#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub canonical_key: String,
    pub representative_name: String,
    pub is_bot: bool,
    pub is_activity_only: bool,
}

pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_kind_parsing() {
        assert_eq!(AccountKind::from("Bot".to_string()), AccountKind::Bot);
        assert_eq!(AccountKind::from("User".to_string()), AccountKind::Human);
        assert_eq!(
            AccountKind::from("Organization".to_string()),
            AccountKind::Unknown
        );
    }

    #[test]
    fn registry_entry_from_json() {
        let json = r#"{"login": "octocat", "email": "o@github.com", "type": "User"}"#;
        let id: RawIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(id.login, "octocat");
        assert_eq!(id.email.as_deref(), Some("o@github.com"));
        assert_eq!(id.kind, AccountKind::Human);
        assert!(id.name.is_none());
    }

    #[test]
    fn registry_entry_kind_defaults_to_unknown() {
        let id: RawIdentity = serde_json::from_str(r#"{"login": "x"}"#).unwrap();
        assert_eq!(id.kind, AccountKind::Unknown);
    }

    #[test]
    fn handle_fallbacks() {
        let mut id = RawIdentity::new("", AccountKind::Human);
        assert_eq!(id.handle(), None);
        id.email = Some("a@b.c".to_string());
        assert_eq!(id.handle(), Some("a@b.c"));
        id.name = Some("Alice".to_string());
        assert_eq!(id.handle(), Some("Alice"));
        id.login = "alice".to_string();
        assert_eq!(id.handle(), Some("alice"));
    }

    #[test]
    fn bot_by_kind_or_login() {
        assert!(RawIdentity::new("bot-ci", AccountKind::Bot).is_bot());
        assert!(RawIdentity::new("renovate-bot", AccountKind::Human).is_bot());
        assert!(RawIdentity::new("ci-runner", AccountKind::Bot).is_bot());
        assert!(!RawIdentity::new("alice", AccountKind::Human).is_bot());
    }
}
