pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(about = "A terminal client for curated AI news", long_about = None)]
pub struct Cli {
    /// Path to the config file (defaults to ~/.config/kiosk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print extracted content for an article
    Extract {
        /// URL of the article
        url: String,

        /// Copy the Chinese summary to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Save an article to bookmarks
    Save {
        /// URL of the article to save
        url: String,
    },
    /// Remove an article from bookmarks
    Unsave {
        /// URL of the article to remove
        url: String,
    },
    /// List bookmarked articles
    Saved,
    /// Launch the TUI
    Tui,
}
