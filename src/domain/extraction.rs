use serde::Deserialize;

/// Response body of the curator service's `/extract` endpoint.
///
/// All fields are optional; a present, non-empty `error` means the
/// extraction failed even though the transport succeeded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub content: Option<String>,
    pub source: Option<Provider>,
    pub chinese_summary: Option<String>,
    pub error: Option<String>,
}

/// Which extraction backend produced the content.
///
/// Tags outside the known set deserialize to `Unknown`, which renders
/// without a provenance indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Tavily,
    Exa,
    Fallback,
    #[serde(other)]
    Unknown,
}

impl Provider {
    /// Badge text for the provenance indicator, `None` for `Unknown`.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Provider::Tavily => Some("Tavily"),
            Provider::Exa => Some("Exa"),
            Provider::Fallback => Some("Preview"),
            Provider::Unknown => None,
        }
    }
}
