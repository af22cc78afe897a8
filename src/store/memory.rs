use std::collections::HashMap;
use std::sync::Mutex;

use crate::app::Result;
use crate::store::StateStore;

/// In-memory state store, used by tests and `AppContext::in_memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("state store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("state store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
