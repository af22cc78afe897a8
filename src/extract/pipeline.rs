use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::app::{KioskError, Result};
use crate::domain::{ArticleRef, LoadingState, Provider, Stage};
use crate::extract::Extractor;
use crate::summary::{strip_formatting, SummaryDoc};

static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Display regions shared by one detail view.
///
/// The TUI implements this over a channel into the event loop; tests
/// implement it with a recording mock. `Send` so a fetch can run on a
/// spawned task while the event loop keeps drawing.
pub trait DetailRegions: Send {
    /// Update the loading view.
    fn show_loading(&mut self, state: &LoadingState);
    /// Hide the loading view and reveal the detail view.
    fn show_detail(&mut self, detail: RenderedDetail);
    /// Hide the loading view and reveal the error view. The detail
    /// view is left untouched.
    fn show_error(&mut self, message: String);
}

/// The reformatted Chinese summary plus the raw text the clipboard
/// copy must reproduce byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock {
    pub doc: SummaryDoc,
    pub raw: String,
}

/// Everything the detail view needs to render one article.
#[derive(Debug, Clone)]
pub struct RenderedDetail {
    pub url: String,
    pub title: String,
    /// `None` renders no provenance indicator.
    pub source: Option<Provider>,
    pub summary: Option<SummaryBlock>,
    /// Normalized text, shown collapsed by default; `None` renders a
    /// placeholder.
    pub content: Option<String>,
}

/// Artificial delays between checkpoints, for perceived-progress
/// pacing. `Pacing::none()` makes the pipeline run flat out (tests,
/// one-shot CLI use).
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    unit: Duration,
}

impl Pacing {
    pub const fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub const fn none() -> Self {
        Self {
            unit: Duration::ZERO,
        }
    }

    fn after(&self, stage: &Stage) -> Duration {
        match stage {
            // Network latency paces the early checkpoints.
            Stage::Preparing | Stage::RequestSent => Duration::ZERO,
            Stage::Processing | Stage::Finalizing => self.unit,
            Stage::ContentReceived { .. } => self.unit * 2,
            // Longer summaries hold the stage longer, capped.
            Stage::SummaryReady { chars } => self.unit * ((chars / 256).min(4) as u32 + 1),
            // Hold the finished bar briefly before the reveal.
            Stage::Complete => self.unit * 8,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

/// One fetch-and-render cycle: network call, staged progress, then a
/// rendered detail view or a rendered error.
///
/// Overlapping invocations against the same regions are allowed; each
/// completes independently and the last write wins.
pub struct Pipeline {
    extractor: Arc<dyn Extractor>,
    pacing: Pacing,
}

impl Pipeline {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self::with_pacing(extractor, Pacing::default())
    }

    pub fn with_pacing(extractor: Arc<dyn Extractor>, pacing: Pacing) -> Self {
        Self { extractor, pacing }
    }

    /// Drive one cycle to its terminal state. Every failure is caught
    /// here and rendered; nothing propagates to the caller.
    pub async fn fetch_and_render(&self, article: &ArticleRef, regions: &mut dyn DetailRegions) {
        match self.run(article, regions).await {
            Ok(detail) => {
                debug!(url = %article.url, "content ready");
                regions.show_detail(detail);
            }
            Err(e) => {
                warn!(url = %article.url, error = %e, "content fetch failed");
                regions.show_error(e.to_string());
            }
        }
    }

    async fn run(
        &self,
        article: &ArticleRef,
        regions: &mut dyn DetailRegions,
    ) -> Result<RenderedDetail> {
        let mut state = LoadingState::new();
        state = self.checkpoint(state, Stage::Preparing, regions).await;
        state = self.checkpoint(state, Stage::RequestSent, regions).await;

        let result = self.extractor.extract(&article.url).await?;

        state = self.checkpoint(state, Stage::Processing, regions).await;

        if let Some(message) = result.error.as_deref().filter(|m| !m.is_empty()) {
            return Err(KioskError::Extraction(message.to_string()));
        }

        let content = result.content.as_deref().filter(|c| !c.is_empty());
        state = self
            .checkpoint(
                state,
                Stage::ContentReceived {
                    bytes: content.map_or(0, str::len),
                },
                regions,
            )
            .await;

        let summary = result
            .chinese_summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|raw| SummaryBlock {
                doc: SummaryDoc::parse(raw),
                raw: strip_formatting(raw),
            });
        if let Some(block) = &summary {
            state = self
                .checkpoint(
                    state,
                    Stage::SummaryReady {
                        chars: block.raw.chars().count(),
                    },
                    regions,
                )
                .await;
        }

        state = self.checkpoint(state, Stage::Finalizing, regions).await;

        let detail = RenderedDetail {
            url: article.url.clone(),
            title: result
                .title
                .clone()
                .or_else(|| article.title.clone())
                .unwrap_or_else(|| "Article Content".to_string()),
            source: result.source.filter(|s| s.badge().is_some()),
            summary,
            content: content.map(normalize_content),
        };

        self.checkpoint(state, Stage::Complete, regions).await;
        Ok(detail)
    }

    async fn checkpoint(
        &self,
        state: LoadingState,
        stage: Stage,
        regions: &mut dyn DetailRegions,
    ) -> LoadingState {
        let next = state.advance(&stage);
        regions.show_loading(&next);
        let delay = self.pacing.after(&stage);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        next
    }
}

/// Normalize extracted content for terminal display: `<br>` variants
/// become newlines, remaining tags are stripped, entities decoded.
pub fn normalize_content(raw: &str) -> String {
    let with_breaks = BR_RE.replace_all(raw, "\n");
    let stripped = strip_tags(&with_breaks);
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

fn strip_tags(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '\n' if !in_tag => {
                result.push('\n');
                last_was_space = false;
            }
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::ExtractionResult;

    struct FixedExtractor(ExtractionResult);

    #[async_trait]
    impl Extractor for FixedExtractor {
        async fn extract(&self, _url: &str) -> Result<ExtractionResult> {
            Ok(self.0.clone())
        }
    }

    struct FailingExtractor(u16);

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract(&self, _url: &str) -> Result<ExtractionResult> {
            Err(KioskError::Transport(self.0))
        }
    }

    #[derive(Default)]
    struct RecordingRegions {
        loading: Vec<LoadingState>,
        detail: Option<RenderedDetail>,
        error: Option<String>,
    }

    impl DetailRegions for RecordingRegions {
        fn show_loading(&mut self, state: &LoadingState) {
            self.loading.push(state.clone());
        }

        fn show_detail(&mut self, detail: RenderedDetail) {
            self.detail = Some(detail);
        }

        fn show_error(&mut self, message: String) {
            self.error = Some(message);
        }
    }

    async fn run(result: ExtractionResult) -> RecordingRegions {
        let pipeline =
            Pipeline::with_pacing(Arc::new(FixedExtractor(result)), Pacing::none());
        let mut regions = RecordingRegions::default();
        pipeline
            .fetch_and_render(&ArticleRef::new("https://example.com/a"), &mut regions)
            .await;
        regions
    }

    #[tokio::test]
    async fn test_success_renders_detail_only() {
        let regions = run(ExtractionResult {
            content: Some("hello".into()),
            source: Some(Provider::Tavily),
            ..Default::default()
        })
        .await;

        let detail = regions.detail.expect("detail shown");
        assert!(regions.error.is_none());
        assert_eq!(detail.source, Some(Provider::Tavily));
        assert_eq!(detail.content.as_deref(), Some("hello"));
        assert!(detail.summary.is_none());
        assert_eq!(detail.title, "Article Content");
    }

    #[tokio::test]
    async fn test_extraction_error_renders_error_only() {
        let regions = run(ExtractionResult {
            error: Some("paywalled".into()),
            content: Some("ignored".into()),
            ..Default::default()
        })
        .await;

        assert!(regions.detail.is_none());
        assert_eq!(regions.error.as_deref(), Some("paywalled"));
    }

    #[tokio::test]
    async fn test_transport_error_mentions_status() {
        let pipeline =
            Pipeline::with_pacing(Arc::new(FailingExtractor(500)), Pacing::none());
        let mut regions = RecordingRegions::default();
        pipeline
            .fetch_and_render(&ArticleRef::new("https://example.com/a"), &mut regions)
            .await;

        assert!(regions.detail.is_none());
        let message = regions.error.expect("error shown");
        assert!(message.contains("500"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_exactly_one_terminal_state() {
        for result in [
            ExtractionResult::default(),
            ExtractionResult {
                error: Some("nope".into()),
                ..Default::default()
            },
            ExtractionResult {
                content: Some("body".into()),
                ..Default::default()
            },
        ] {
            let regions = run(result).await;
            assert!(
                regions.detail.is_some() ^ regions.error.is_some(),
                "pipeline must end in exactly one of detail/error"
            );
        }
    }

    #[tokio::test]
    async fn test_loading_progress_is_monotone_and_completes() {
        let regions = run(ExtractionResult {
            content: Some("x".repeat(4096)),
            chinese_summary: Some("标题: Foo\n摘要: Bar".into()),
            ..Default::default()
        })
        .await;

        let progress: Vec<u8> = regions.loading.iter().map(|s| s.progress).collect();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{:?}", progress);
        assert_eq!(*progress.last().unwrap(), 100);
        // The summary checkpoint is present.
        assert!(progress.iter().any(|&p| (70..=85).contains(&p)));
    }

    #[tokio::test]
    async fn test_no_summary_skips_summary_checkpoint() {
        let regions = run(ExtractionResult {
            content: Some("hello".into()),
            ..Default::default()
        })
        .await;

        let progress: Vec<u8> = regions.loading.iter().map(|s| s.progress).collect();
        assert!(!progress.iter().any(|&p| (70..=85).contains(&p)));
    }

    #[tokio::test]
    async fn test_summary_block_keeps_raw_for_clipboard() {
        let raw = "```text 标题: Foo\n摘要: Bar\n```";
        let regions = run(ExtractionResult {
            content: Some("hello".into()),
            chinese_summary: Some(raw.into()),
            ..Default::default()
        })
        .await;

        let block = regions.detail.unwrap().summary.unwrap();
        assert_eq!(block.raw, strip_formatting(raw));
        assert_eq!(block.doc.title.as_deref(), Some("Foo"));
    }

    #[tokio::test]
    async fn test_unknown_source_renders_no_indicator() {
        let regions = run(ExtractionResult {
            content: Some("hello".into()),
            source: Some(Provider::Unknown),
            ..Default::default()
        })
        .await;

        assert_eq!(regions.detail.unwrap().source, None);
    }

    #[tokio::test]
    async fn test_empty_content_becomes_placeholder() {
        let regions = run(ExtractionResult {
            content: Some(String::new()),
            ..Default::default()
        })
        .await;

        assert_eq!(regions.detail.unwrap().content, None);
    }

    #[tokio::test]
    async fn test_result_title_wins_over_article_title() {
        let pipeline = Pipeline::with_pacing(
            Arc::new(FixedExtractor(ExtractionResult {
                title: Some("From Service".into()),
                content: Some("hello".into()),
                ..Default::default()
            })),
            Pacing::none(),
        );
        let mut regions = RecordingRegions::default();
        let mut article = ArticleRef::new("https://example.com/a");
        article.title = Some("From Caller".into());
        pipeline.fetch_and_render(&article, &mut regions).await;

        assert_eq!(regions.detail.unwrap().title, "From Service");
    }

    #[test]
    fn test_normalize_content_strips_tags_and_entities() {
        let html = "<div class=\"exa-content\"><h1>Title</h1><p>a &amp; b<br>next</p></div>";
        let text = normalize_content(html);
        assert!(!text.contains('<'));
        assert!(text.contains("a & b"));
        assert!(text.contains("Title"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_normalize_content_plain_text_passes_through() {
        assert_eq!(normalize_content("plain text"), "plain text");
    }
}
