use std::collections::HashSet;
use tokio::sync::RwLock;

pub const MAX_KEY_CHARS: usize = 120;

/// Case-folds, trims and collapses whitespace, then caps the length in characters.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .take(MAX_KEY_CHARS)
        .collect()
}

/// Key for a listing, derived from the candidate title.
pub fn item_key(title: &str) -> String {
    format!("item:{}", normalize_key(title))
}

/// Key for a price-level summary, derived from the watch keyword.
pub fn keyword_key(keyword: &str) -> String {
    format!("keyword:{}", normalize_key(keyword))
}

/// Keys already reported during this process. Grows monotonically; a restart starts empty.
pub struct Deduplicator {
    seen: RwLock<HashSet<String>>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self { seen: RwLock::new(HashSet::new()) }
    }

    pub async fn seen(&self, key: &str) -> bool {
        self.seen.read().await.contains(&normalize_key(key))
    }

    pub async fn record(&self, key: &str) {
        self.seen.write().await.insert(normalize_key(key));
    }

    /// Records `key` and returns `true` if it had not been seen before.
    pub async fn check_and_record(&self, key: &str) -> bool {
        self.seen.write().await.insert(normalize_key(key))
    }

    pub async fn len(&self) -> usize {
        self.seen.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.seen.read().await.is_empty()
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}
