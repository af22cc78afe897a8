use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to an article on the curated list.
///
/// The URL is the article's identity: it keys the bookmark set and is
/// the query parameter sent to the extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRef {
    pub url: String,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }

    /// Human label for the article's publisher, derived from the URL host.
    pub fn source_label(&self) -> String {
        let Ok(parsed) = Url::parse(&self.url) else {
            return "unknown".to_string();
        };
        let Some(host) = parsed.host_str() else {
            return "unknown".to_string();
        };
        let domain = host.strip_prefix("www.").unwrap_or(host);

        let label = match domain {
            "techcrunch.com" => "TechCrunch",
            "36kr.com" | "m.36kr.com" => "36Kr",
            "news.qq.com" => "腾讯新闻",
            "163.com" => "网易新闻",
            "theinformation.com" => "The Information",
            "yahoo.com" => "Yahoo",
            "bloomberg.com" => "Bloomberg",
            "reuters.com" => "Reuters",
            "cnbc.com" => "CNBC",
            "wsj.com" => "Wall Street Journal",
            "nytimes.com" => "New York Times",
            "ft.com" => "Financial Times",
            "ftchinese.com" => "Financial Times (Chinese)",
            other => other,
        };
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let mut article = ArticleRef::new("https://example.com/a");
        article.title = Some("My Article".into());
        assert_eq!(article.display_title(), "My Article");
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        let article = ArticleRef::new("https://example.com/a");
        assert_eq!(article.display_title(), "https://example.com/a");
    }

    #[test]
    fn test_source_label_known_domain() {
        let article = ArticleRef::new("https://techcrunch.com/2025/06/01/some-story/");
        assert_eq!(article.source_label(), "TechCrunch");
    }

    #[test]
    fn test_source_label_strips_www() {
        let article = ArticleRef::new("https://www.reuters.com/technology/article");
        assert_eq!(article.source_label(), "Reuters");
    }

    #[test]
    fn test_source_label_unknown_domain_uses_host() {
        let article = ArticleRef::new("https://blog.example.org/post");
        assert_eq!(article.source_label(), "blog.example.org");
    }

    #[test]
    fn test_source_label_invalid_url() {
        let article = ArticleRef::new("not a url");
        assert_eq!(article.source_label(), "unknown");
    }
}
