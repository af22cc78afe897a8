use std::sync::Arc;
use std::time::Duration;

use crate::app::Result;
use crate::config::Config;
use crate::extract::{Extractor, HttpExtractor};
use crate::store::{Bookmarks, FileStore, MemoryStore, Prefs, StateStore};

/// Wires together the client's collaborators: the persisted state
/// store (with bookmark and preference views over it) and the
/// extraction client.
pub struct AppContext {
    pub store: Arc<dyn StateStore>,
    pub bookmarks: Bookmarks,
    pub prefs: Prefs,
    pub extractor: Arc<dyn Extractor>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn StateStore> = Arc::new(FileStore::open(FileStore::default_path()?)?);
        Ok(Self::with_store(config, store))
    }

    pub fn in_memory(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn StateStore>) -> Self {
        let extractor: Arc<dyn Extractor> = Arc::new(HttpExtractor::new(
            config.service.endpoint.clone(),
            Duration::from_secs(config.service.timeout_secs),
        ));

        Self {
            bookmarks: Bookmarks::new(store.clone()),
            prefs: Prefs::new(store.clone()),
            store,
            extractor,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_context_shares_one_store() {
        let ctx = AppContext::in_memory(Config::default());
        ctx.bookmarks.save("https://a").unwrap();
        assert!(ctx
            .store
            .get(crate::store::keys::SAVED_ARTICLES)
            .unwrap()
            .is_some());
    }
}
