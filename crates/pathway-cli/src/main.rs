//! Pathway CLI application.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pathway_core::{PathwayBuilder, TrackerConfig};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        base_url,
        no_color,
        command,
    } = Args::parse();

    let tracker_config = match &command {
        Some(Goal(args)) => args.tracker_config(),
        _ => TrackerConfig::default(),
    };

    let pathway = PathwayBuilder::new()
        .with_database_path(database_file)
        .with_base_url(base_url)
        .with_tracker_config(tracker_config)
        .build()
        .await
        .context("Failed to initialize pathway")?;

    let cli = Cli::new(pathway, TerminalRenderer::new(!no_color));

    info!("Pathway started");

    match command {
        Some(Auth { command }) => cli.handle_auth_command(command).await,
        Some(Goal(args)) => cli.handle_goal(args).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Profile { command }) => cli.handle_profile_command(command).await,
        None => cli.status(),
    }
}
