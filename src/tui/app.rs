use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::domain::{ArticleRef, LoadingState};
use crate::extract::RenderedDetail;
use crate::store::{Theme, ViewMode};
use crate::tui::toast::Toast;

/// How long the copy affordance stays in its "copied" state.
pub const COPY_FLASH_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Articles,
    Detail,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::Detail,
            ActivePane::Detail => ActivePane::Articles,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// What the detail pane currently shows. Exactly one variant at a
/// time; a finished fetch replaces the loading view with either the
/// detail or the error.
#[derive(Debug, Clone)]
pub enum DetailState {
    Empty,
    Loading(LoadingState),
    Ready(RenderedDetail),
    Failed(String),
}

/// Updates emitted by an in-flight fetch. Applied in arrival order;
/// overlapping fetches race and the last write wins.
#[derive(Debug)]
pub enum DetailEvent {
    Loading(LoadingState),
    Ready(Box<RenderedDetail>),
    Failed(String),
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub articles: Vec<ArticleRef>,
    pub article_index: usize,
    pub list_state: ListState,
    pub saved: Vec<String>,
    pub detail: DetailState,
    /// The article the detail pane is showing or loading.
    pub current: Option<ArticleRef>,
    pub content_open: bool,
    pub detail_scroll: u16,
    pub theme: Theme,
    pub view: ViewMode,
    pub toast: Option<Toast>,
    pub copy_flashed_at: Option<Instant>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(articles: Vec<ArticleRef>, saved: Vec<String>, theme: Theme, view: ViewMode) -> Self {
        let mut list_state = ListState::default();
        if !articles.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            active_pane: ActivePane::Articles,
            articles,
            article_index: 0,
            list_state,
            saved,
            detail: DetailState::Empty,
            current: None,
            content_open: false,
            detail_scroll: 0,
            theme,
            view,
            toast: None,
            copy_flashed_at: None,
            should_quit: false,
        }
    }

    pub fn selected_article(&self) -> Option<&ArticleRef> {
        self.articles.get(self.article_index)
    }

    pub fn is_saved(&self, url: &str) -> bool {
        self.saved.iter().any(|s| s == url)
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index > 0 {
                    self.article_index -= 1;
                    self.list_state.select(Some(self.article_index));
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index + 1 < self.articles.len() {
                    self.article_index += 1;
                    self.list_state.select(Some(self.article_index));
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    /// Replace any visible toast with a new one.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Expire transient visual state; called once per event-loop tick.
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        if self
            .copy_flashed_at
            .is_some_and(|at| at.elapsed() >= COPY_FLASH_TTL)
        {
            self.copy_flashed_at = None;
        }
    }

    pub fn copy_flash_active(&self) -> bool {
        self.copy_flashed_at
            .is_some_and(|at| at.elapsed() < COPY_FLASH_TTL)
    }

    pub fn apply(&mut self, event: DetailEvent) {
        match event {
            DetailEvent::Loading(state) => {
                self.detail = DetailState::Loading(state);
            }
            DetailEvent::Ready(detail) => {
                self.detail = DetailState::Ready(*detail);
                self.content_open = false;
                self.detail_scroll = 0;
            }
            DetailEvent::Failed(message) => {
                self.detail = DetailState::Failed(message);
            }
        }
    }
}
