use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kiosk::app::AppContext;
use kiosk::cli::{commands, Cli, Commands};
use kiosk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    let ctx = AppContext::new(config)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Extract { url, copy } => {
            commands::extract(&ctx, &url, copy).await?;
        }
        Commands::Save { url } => {
            commands::save(&ctx, &url)?;
        }
        Commands::Unsave { url } => {
            commands::unsave(&ctx, &url)?;
        }
        Commands::Saved => {
            commands::saved(&ctx)?;
        }
        Commands::Tui => {
            kiosk::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
