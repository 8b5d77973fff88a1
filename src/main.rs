// Allow dead code for API surface exercised only by tests
#![allow(dead_code)]

mod cli;
mod closet;
mod config;
mod core;
mod models;
mod outfit;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::core::{run_doctor, Wardrobe};
use crate::ui::Console;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load()?;
    let console = Console::new();

    console.banner();

    match cli.command {
        Some(Commands::Add { image }) => {
            let mut wardrobe = Wardrobe::new(settings, cli.closet)?;
            wardrobe.add_item(&image).await?;
        }
        Some(Commands::Suggest { weather, event }) => {
            let wardrobe = Wardrobe::new(settings, cli.closet)?;
            wardrobe.suggest(weather, event).await?;
        }
        Some(Commands::Similar { image, top_k }) => {
            let wardrobe = Wardrobe::new(settings, cli.closet)?;
            wardrobe.similar(&image, top_k).await?;
        }
        Some(Commands::Items) => {
            let wardrobe = Wardrobe::new(settings, cli.closet)?;
            wardrobe.items();
        }
        Some(Commands::Config) => {
            console.show_config(&settings);
        }
        Some(Commands::Doctor) => {
            run_doctor(&settings)?;
        }
        None => {
            let mut wardrobe = Wardrobe::new(settings, cli.closet)?;
            wardrobe.repl().await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "closet=debug" } else { "closet=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
