use std::sync::Arc;

use crate::app::Result;
use crate::store::{keys, StateStore};

/// Display theme, persisted under the `theme` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn tag(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unrecognized tags fall back to the default.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Article-list presentation, persisted under the `preferred-view` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn tag(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Persisted display preferences and the first-visit flag.
#[derive(Clone)]
pub struct Prefs {
    store: Arc<dyn StateStore>,
}

impl Prefs {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(keys::THEME)
            .ok()
            .flatten()
            .map(|tag| Theme::from_tag(&tag))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(keys::THEME, theme.tag())
    }

    pub fn view(&self) -> ViewMode {
        self.store
            .get(keys::PREFERRED_VIEW)
            .ok()
            .flatten()
            .map(|tag| ViewMode::from_tag(&tag))
            .unwrap_or_default()
    }

    pub fn set_view(&self, view: ViewMode) -> Result<()> {
        self.store.set(keys::PREFERRED_VIEW, view.tag())
    }

    /// True exactly once, on the first call ever; records the visit.
    pub fn first_visit(&self) -> Result<bool> {
        if self.store.get(keys::VISITED)?.is_some() {
            return Ok(false);
        }
        self.store.set(keys::VISITED, "true")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn prefs() -> Prefs {
        Prefs::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_theme_defaults_to_light() {
        assert_eq!(prefs().theme(), Theme::Light);
    }

    #[test]
    fn test_theme_round_trip() {
        let prefs = prefs();
        prefs.set_theme(Theme::Dark).unwrap();
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_unrecognized_theme_tag_falls_back() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::THEME, "solarized").unwrap();
        assert_eq!(Prefs::new(store).theme(), Theme::Light);
    }

    #[test]
    fn test_view_defaults_to_grid() {
        assert_eq!(prefs().view(), ViewMode::Grid);
    }

    #[test]
    fn test_view_round_trip() {
        let prefs = prefs();
        prefs.set_view(ViewMode::List).unwrap();
        assert_eq!(prefs.view(), ViewMode::List);
    }

    #[test]
    fn test_first_visit_fires_once() {
        let prefs = prefs();
        assert!(prefs.first_visit().unwrap());
        assert!(!prefs.first_visit().unwrap());
        assert!(!prefs.first_visit().unwrap());
    }

    #[test]
    fn test_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(ViewMode::Grid.toggled(), ViewMode::List);
        assert_eq!(ViewMode::List.toggled(), ViewMode::Grid);
    }
}
