pub mod app;
pub mod clipboard;
pub mod event;
pub mod layout;
pub mod toast;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::domain::{ArticleRef, LoadingState};
use crate::extract::{DetailRegions, Pipeline, RenderedDetail};

use self::app::{ActivePane, DetailEvent, DetailState, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Forwards pipeline updates into the event loop. The loop applies
/// them in arrival order, so overlapping fetches naturally resolve
/// last-write-wins.
struct ChannelRegions {
    tx: mpsc::UnboundedSender<DetailEvent>,
}

impl DetailRegions for ChannelRegions {
    fn show_loading(&mut self, state: &LoadingState) {
        let _ = self.tx.send(DetailEvent::Loading(state.clone()));
    }

    fn show_detail(&mut self, detail: RenderedDetail) {
        let _ = self.tx.send(DetailEvent::Ready(Box::new(detail)));
    }

    fn show_error(&mut self, message: String) {
        let _ = self.tx.send(DetailEvent::Failed(message));
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let articles = initial_articles(&ctx);
    let mut tui_app = TuiApp::new(
        articles,
        ctx.bookmarks.all(),
        ctx.prefs.theme(),
        ctx.prefs.view(),
    );
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();

    if ctx.prefs.first_visit().unwrap_or(false) {
        tui_app.notify("Welcome to Kiosk 🕊️");
    }

    loop {
        while let Ok(update) = rx.try_recv() {
            tui_app.apply(update);
        }
        tui_app.tick();

        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = Action::from(key);
                match action {
                    Action::Quit => {
                        tui_app.should_quit = true;
                    }
                    Action::MoveUp => {
                        tui_app.move_up();
                    }
                    Action::MoveDown => {
                        tui_app.move_down();
                    }
                    Action::NextPane => {
                        tui_app.active_pane = tui_app.active_pane.next();
                    }
                    Action::PrevPane => {
                        tui_app.active_pane = tui_app.active_pane.prev();
                    }
                    Action::Select => {
                        if tui_app.active_pane == ActivePane::Articles {
                            if let Some(article) = tui_app.selected_article().cloned() {
                                start_fetch(&ctx, &tx, article.clone());
                                tui_app.current = Some(article);
                                tui_app.active_pane = ActivePane::Detail;
                            }
                        }
                    }
                    Action::Refetch => {
                        if let Some(article) = tui_app.current.clone() {
                            start_fetch(&ctx, &tx, article);
                        }
                    }
                    Action::ToggleSave => {
                        if let Some(article) = target_article(&tui_app).cloned() {
                            toggle_save(&ctx, &mut tui_app, &article.url);
                        }
                    }
                    Action::CopySummary => {
                        copy_summary(&mut tui_app);
                    }
                    Action::ToggleContent => {
                        if matches!(tui_app.detail, DetailState::Ready(_)) {
                            tui_app.content_open = !tui_app.content_open;
                        }
                    }
                    Action::OpenInBrowser => {
                        if let Some(article) = target_article(&tui_app).cloned() {
                            if let Err(e) = open::that(&article.url) {
                                tui_app.notify(format!("Failed to open browser: {}", e));
                            }
                        }
                    }
                    Action::ToggleTheme => {
                        let theme = tui_app.theme.toggled();
                        match ctx.prefs.set_theme(theme) {
                            Ok(()) => {
                                tui_app.theme = theme;
                                tui_app.notify(format!("Switched to {} mode 🌓", theme.tag()));
                            }
                            Err(e) => tui_app.notify(format!("Failed to save theme: {}", e)),
                        }
                    }
                    Action::ToggleView => {
                        let view = tui_app.view.toggled();
                        match ctx.prefs.set_view(view) {
                            Ok(()) => {
                                tui_app.view = view;
                                tui_app.notify(format!("Switched to {} view", view.tag()));
                            }
                            Err(e) => tui_app.notify(format!("Failed to save view: {}", e)),
                        }
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Curated articles from the config, followed by saved articles not
/// already on the list.
fn initial_articles(ctx: &AppContext) -> Vec<ArticleRef> {
    let mut articles: Vec<ArticleRef> = ctx.config.articles.iter().map(ArticleRef::from).collect();
    for url in ctx.bookmarks.all() {
        if !articles.iter().any(|a| a.url == url) {
            articles.push(ArticleRef::new(url));
        }
    }
    articles
}

/// The article an action applies to: the previewed one when the
/// detail pane is active, the selected one otherwise.
fn target_article(tui_app: &TuiApp) -> Option<&ArticleRef> {
    match tui_app.active_pane {
        ActivePane::Detail => tui_app.current.as_ref(),
        ActivePane::Articles => tui_app.selected_article(),
    }
}

fn start_fetch(ctx: &AppContext, tx: &mpsc::UnboundedSender<DetailEvent>, article: ArticleRef) {
    let pipeline = Pipeline::new(ctx.extractor.clone());
    let mut regions = ChannelRegions { tx: tx.clone() };
    tokio::spawn(async move {
        pipeline.fetch_and_render(&article, &mut regions).await;
    });
}

fn toggle_save(ctx: &AppContext, tui_app: &mut TuiApp, url: &str) {
    let result = if tui_app.is_saved(url) {
        ctx.bookmarks.remove(url).map(|removed| {
            if removed {
                Some("Article removed from bookmarks")
            } else {
                None
            }
        })
    } else {
        ctx.bookmarks.save(url).map(|added| {
            if added {
                Some("Article saved to bookmarks! 🔖")
            } else {
                None
            }
        })
    };

    match result {
        Ok(Some(message)) => {
            tui_app.saved = ctx.bookmarks.all();
            tui_app.notify(message);
        }
        Ok(None) => {}
        Err(e) => tui_app.notify(format!("Failed to update bookmarks: {}", e)),
    }
}

fn copy_summary(tui_app: &mut TuiApp) {
    let DetailState::Ready(detail) = &tui_app.detail else {
        return;
    };
    let Some(block) = &detail.summary else {
        return;
    };

    match clipboard::copy(&block.raw) {
        Ok(()) => {
            tui_app.copy_flashed_at = Some(Instant::now());
            tui_app.notify("摘要已复制到剪贴板 ✅");
        }
        Err(_) => {
            tui_app.notify("复制失败，请重试");
        }
    }
}
