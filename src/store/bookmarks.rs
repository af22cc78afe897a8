use std::sync::Arc;

use crate::app::{KioskError, Result};
use crate::store::{keys, StateStore};

/// The set of saved article URLs, persisted as a JSON array under the
/// `saved-articles` key. Insertion order is preserved across
/// round-trips; membership has no ordering semantics.
#[derive(Clone)]
pub struct Bookmarks {
    store: Arc<dyn StateStore>,
}

impl Bookmarks {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// All saved URLs, oldest first. Malformed persisted state reads
    /// as empty.
    pub fn all(&self) -> Vec<String> {
        self.store
            .get(keys::SAVED_ARTICLES)
            .ok()
            .flatten()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.all().iter().any(|saved| saved == url)
    }

    /// Save a URL. Returns false (and changes nothing) when it is
    /// already saved.
    pub fn save(&self, url: &str) -> Result<bool> {
        let mut saved = self.all();
        if saved.iter().any(|s| s == url) {
            return Ok(false);
        }
        saved.push(url.to_string());
        self.write(&saved)?;
        Ok(true)
    }

    /// Remove a URL. Returns false (and changes nothing) when it was
    /// not saved.
    pub fn remove(&self, url: &str) -> Result<bool> {
        let mut saved = self.all();
        let before = saved.len();
        saved.retain(|s| s != url);
        if saved.len() == before {
            return Ok(false);
        }
        self.write(&saved)?;
        Ok(true)
    }

    fn write(&self, saved: &[String]) -> Result<()> {
        let text = serde_json::to_string(saved).map_err(|e| KioskError::Store(e.to_string()))?;
        self.store.set(keys::SAVED_ARTICLES, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn bookmarks() -> Bookmarks {
        Bookmarks::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_empty_by_default() {
        assert!(bookmarks().all().is_empty());
    }

    #[test]
    fn test_save_and_contains() {
        let bookmarks = bookmarks();
        assert!(bookmarks.save("https://a").unwrap());
        assert!(bookmarks.contains("https://a"));
        assert!(!bookmarks.contains("https://b"));
    }

    #[test]
    fn test_save_already_saved_is_noop() {
        let bookmarks = bookmarks();
        assert!(bookmarks.save("https://a").unwrap());
        assert!(!bookmarks.save("https://a").unwrap());
        assert_eq!(bookmarks.all(), vec!["https://a"]);
    }

    #[test]
    fn test_remove_not_saved_is_noop() {
        let bookmarks = bookmarks();
        assert!(!bookmarks.remove("https://a").unwrap());
    }

    #[test]
    fn test_save_two_remove_first() {
        let bookmarks = bookmarks();
        bookmarks.save("https://a").unwrap();
        bookmarks.save("https://b").unwrap();
        assert!(bookmarks.remove("https://a").unwrap());
        assert_eq!(bookmarks.all(), vec!["https://b"]);
    }

    #[test]
    fn test_insertion_order_survives_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let bookmarks = Bookmarks::new(store.clone());
        bookmarks.save("https://c").unwrap();
        bookmarks.save("https://a").unwrap();
        bookmarks.save("https://b").unwrap();

        let reread = Bookmarks::new(store);
        assert_eq!(reread.all(), vec!["https://c", "https://a", "https://b"]);
    }

    #[test]
    fn test_malformed_state_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::SAVED_ARTICLES, "not json").unwrap();
        let bookmarks = Bookmarks::new(store);
        assert!(bookmarks.all().is_empty());
        // Saving repairs the value.
        bookmarks.save("https://a").unwrap();
        assert_eq!(bookmarks.all(), vec!["https://a"]);
    }
}
