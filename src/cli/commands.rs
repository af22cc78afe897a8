use url::Url;

use crate::app::{AppContext, Result};
use crate::domain::{ArticleRef, LoadingState};
use crate::extract::{DetailRegions, Pacing, Pipeline, RenderedDetail};
use crate::tui::clipboard;

/// Display regions for one-shot terminal output.
#[derive(Default)]
struct StdoutRegions {
    summary_raw: Option<String>,
}

impl DetailRegions for StdoutRegions {
    fn show_loading(&mut self, state: &LoadingState) {
        eprintln!("[{:>3}%] {}", state.progress, state.message);
    }

    fn show_detail(&mut self, detail: RenderedDetail) {
        println!("{}", detail.title);
        if let Some(badge) = detail.source.and_then(|s| s.badge()) {
            println!("[{}]", badge);
        }
        println!();

        if let Some(block) = &detail.summary {
            println!("中文摘要");
            println!("{}", block.doc.render_text());
            println!();
            self.summary_raw = Some(block.raw.clone());
        }

        println!("Original Content");
        match &detail.content {
            Some(content) => println!("{}", content),
            None => println!("No content available"),
        }
    }

    fn show_error(&mut self, message: String) {
        eprintln!("Error: {}", message);
    }
}

pub async fn extract(ctx: &AppContext, url: &str, copy: bool) -> Result<()> {
    Url::parse(url)?;

    let article = ArticleRef::new(url);
    let pipeline = Pipeline::with_pacing(ctx.extractor.clone(), Pacing::none());
    let mut regions = StdoutRegions::default();
    pipeline.fetch_and_render(&article, &mut regions).await;

    if copy {
        match regions.summary_raw {
            Some(raw) => match clipboard::copy(&raw) {
                Ok(()) => println!("摘要已复制到剪贴板 ✅"),
                Err(e) => eprintln!("复制失败，请重试 ({})", e),
            },
            None => eprintln!("No summary to copy"),
        }
    }

    Ok(())
}

pub fn save(ctx: &AppContext, url: &str) -> Result<()> {
    Url::parse(url)?;
    if ctx.bookmarks.save(url)? {
        println!("Saved: {}", url);
    } else {
        println!("Already saved: {}", url);
    }
    Ok(())
}

pub fn unsave(ctx: &AppContext, url: &str) -> Result<()> {
    Url::parse(url)?;
    if ctx.bookmarks.remove(url)? {
        println!("Removed: {}", url);
    } else {
        println!("Not saved: {}", url);
    }
    Ok(())
}

pub fn saved(ctx: &AppContext) -> Result<()> {
    let saved = ctx.bookmarks.all();
    if saved.is_empty() {
        println!("No saved articles");
        return Ok(());
    }

    for url in saved {
        let article = ArticleRef::new(url);
        println!("{}  ({})", article.url, article.source_label());
    }
    Ok(())
}
