//! Configuration for the kiosk client.
//!
//! Read from `~/.config/kiosk/config.toml` at startup. If the file
//! doesn't exist, a default configuration with comments is created.
//! Missing fields use default values.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ArticleRef;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub articles: Vec<ArticleEntry>,
}

/// Where the curator service lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8081".to_string(),
            timeout_secs: 10,
        }
    }
}

/// A curated article shown in the TUI list.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleEntry {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
}

impl From<&ArticleEntry> for ArticleRef {
    fn from(entry: &ArticleEntry) -> Self {
        Self {
            url: entry.url.clone(),
            title: entry.title.clone(),
            published_at: entry.published,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not find config directory")]
    NoConfigDir,
}

impl Config {
    /// Load configuration from `path`, or the default path when absent.
    ///
    /// A missing file is created with commented defaults; an existing
    /// but invalid file is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/kiosk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("kiosk").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Kiosk configuration
#
# [service] points at the curator service providing the /extract
# endpoint.
#
# Curated articles shown in the TUI list, one [[articles]] block each:
#
# [[articles]]
# url = "https://techcrunch.com/2025/06/01/some-story/"
# title = "Optional display title"
# published = "2025-06-01T12:00:00Z"

[service]
endpoint = "http://127.0.0.1:8081"
timeout_secs = 10
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.service.endpoint, "http://127.0.0.1:8081");
        assert_eq!(config.service.timeout_secs, 10);
        assert!(config.articles.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [service]
            endpoint = "https://curator.example.com"
            timeout_secs = 5

            [[articles]]
            url = "https://techcrunch.com/story"
            title = "A Story"
            published = "2025-06-01T12:00:00Z"

            [[articles]]
            url = "https://36kr.com/p/1"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.endpoint, "https://curator.example.com");
        assert_eq!(config.articles.len(), 2);
        assert_eq!(config.articles[0].title.as_deref(), Some("A Story"));
        assert!(config.articles[0].published.is_some());
        assert!(config.articles[1].title.is_none());
    }

    #[test]
    fn test_article_entry_to_ref() {
        let config: Config = toml::from_str(
            r#"
            [[articles]]
            url = "https://example.com/a"
            title = "T"
            "#,
        )
        .unwrap();
        let article = ArticleRef::from(&config.articles[0]);
        assert_eq!(article.url, "https://example.com/a");
        assert_eq!(article.display_title(), "T");
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert_eq!(config.service.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(toml::from_str::<Config>("service = 3").is_err());
    }
}
