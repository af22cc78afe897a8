use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{KioskError, Result};
use crate::domain::ExtractionResult;
use crate::extract::Extractor;

/// reqwest-based client for `GET <endpoint>/extract?url=…`.
pub struct HttpExtractor {
    client: Client,
    endpoint: String,
}

impl HttpExtractor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("kiosk/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractionResult> {
        let request_url = format!("{}/extract", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(&request_url)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KioskError::Transport(status.as_u16()));
        }

        Ok(response.json::<ExtractionResult>().await?)
    }
}
