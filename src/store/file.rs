use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::app::{KioskError, Result};
use crate::store::StateStore;

/// File-backed state store: a single JSON object of string keys and
/// values, loaded at open and written through on every `set`.
///
/// A missing or malformed file is treated as empty; bad persisted
/// state never propagates.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                debug!(path = %path.display(), error = %e, "ignoring malformed state file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Default location: `~/.local/share/kiosk/state.json` (or the
    /// platform equivalent).
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| KioskError::Store("Could not find data directory".into()))?;
        Ok(data_dir.join("kiosk").join("state.json"))
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| KioskError::Store(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("state store mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("state store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}
