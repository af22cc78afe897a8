//! Article content extraction via the curator service.
//!
//! The service does the heavy lifting (readability extraction,
//! summarization); this module is the client side: the [`Extractor`]
//! trait over the HTTP call, and the [`pipeline`] that drives one
//! fetch-and-render cycle against a set of display regions.

mod client;
mod pipeline;

pub use client::HttpExtractor;
pub use pipeline::{DetailRegions, Pacing, Pipeline, RenderedDetail, SummaryBlock};

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::ExtractionResult;

/// Trait for content extraction implementations.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract readable content for an article URL.
    async fn extract(&self, url: &str) -> Result<ExtractionResult>;
}
