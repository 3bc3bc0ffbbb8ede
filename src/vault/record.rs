//! The secret record stored inside a vault.
//!
//! Records only ever exist in plaintext in process memory; on disk
//! they live inside the vault file's ciphertext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One titled, tagged secret entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Opaque unique id, assigned at creation and stable thereafter.
    pub id: String,

    /// Human-readable title (e.g. "Gmail").
    pub title: String,

    /// The sensitive content itself.
    pub payload: String,

    /// Tags in the order they were given, duplicates removed.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Username of the credential under which this record was last
    /// persisted. Rewritten on every credentials reset.
    pub owner_username: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl SecretRecord {
    /// Build a fresh record stamped with the current owner and time.
    pub fn new(title: &str, payload: &str, tags: &[String], owner_username: &str) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !deduped.iter().any(|t| t == tag) {
                deduped.push(tag.clone());
            }
        }

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            payload: payload.to_string(),
            tags: deduped,
            owner_username: owner_username.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let a = SecretRecord::new("A", "x", &[], "admin");
        let b = SecretRecord::new("B", "y", &[], "admin");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let tags = ["work".to_string(), "mail".to_string(), "work".to_string()];
        let r = SecretRecord::new("A", "x", &tags, "admin");
        assert_eq!(r.tags, vec!["work", "mail"]);
    }

    #[test]
    fn tag_match_is_case_sensitive() {
        let r = SecretRecord::new("A", "x", &["Work".to_string()], "admin");
        assert!(r.has_tag("Work"));
        assert!(!r.has_tag("work"));
    }
}
