pub mod bookmarks;
pub mod file;
pub mod memory;
pub mod prefs;

pub use bookmarks::Bookmarks;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use prefs::{Prefs, Theme, ViewMode};

use crate::app::Result;

/// Keys of the persisted state layout.
pub mod keys {
    pub const SAVED_ARTICLES: &str = "saved-articles";
    pub const THEME: &str = "theme";
    pub const PREFERRED_VIEW: &str = "preferred-view";
    pub const VISITED: &str = "visited";
}

/// Key-value state storage with string keys and values.
///
/// Backends are injected so everything above this trait is testable
/// without touching the filesystem.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
