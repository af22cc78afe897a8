//! # Kiosk
//!
//! A terminal client for a news-curation service.
//!
//! ## Architecture
//!
//! ```text
//! ArticleRef → Extractor → Pipeline → DetailRegions → TUI/CLI
//!                                   ↘ Summary reformatter
//!            StateStore → Bookmarks / Prefs
//! ```
//!
//! The curator service does the extraction and summarization; kiosk
//! is the presentation side: it drives the `/extract` call with staged
//! progress, reformats the Chinese summary, and renders the result
//! into whatever implements [`extract::DetailRegions`].
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse the curated list
//! kiosk
//!
//! # One-shot extraction to stdout
//! kiosk extract https://techcrunch.com/some-story/
//!
//! # Bookmarks
//! kiosk save https://techcrunch.com/some-story/
//! kiosk saved
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together the state store,
/// bookmark and preference views, and the extraction client.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads `~/.config/kiosk/config.toml`: the curator service endpoint
/// and the curated article list.
pub mod config;

/// Core domain models.
///
/// - [`ArticleRef`](domain::ArticleRef): article identity plus display metadata
/// - [`ExtractionResult`](domain::ExtractionResult): `/extract` response body
/// - [`LoadingState`](domain::LoadingState) / [`Stage`](domain::Stage): fetch progress
pub mod domain;

/// The content fetch pipeline.
///
/// - [`Extractor`](extract::Extractor): async trait over the `/extract` call
/// - [`HttpExtractor`](extract::HttpExtractor): reqwest-based implementation
/// - [`Pipeline`](extract::Pipeline): one fetch-and-render cycle with
///   staged progress against a set of [`DetailRegions`](extract::DetailRegions)
pub mod extract;

/// Persisted key-value state.
///
/// - [`StateStore`](store::StateStore): injected storage backend
/// - [`FileStore`](store::FileStore) / [`MemoryStore`](store::MemoryStore)
/// - [`Bookmarks`](store::Bookmarks): the saved-article set
/// - [`Prefs`](store::Prefs): theme, view mode, first-visit flag
pub mod store;

/// Chinese summary reformatting.
///
/// [`SummaryDoc`](summary::SummaryDoc) splits the 标题/摘要/关键点
/// sections; [`strip_formatting`](summary::strip_formatting) produces
/// the clipboard form.
pub mod summary;

/// Terminal user interface.
///
/// Two-pane layout (articles, detail) with a status bar and toast
/// overlay. Keybindings: j/k navigate, Tab cycles panes, Enter
/// previews, s saves, c copies the summary, e expands the original
/// content, o opens in browser, t/v toggle theme and view, R
/// refetches, q quits.
pub mod tui;
