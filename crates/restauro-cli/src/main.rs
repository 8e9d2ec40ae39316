//! Restauro CLI Application
//!
//! Command-line host for the restoration checklist, calculators and help
//! desk chat.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use restauro_core::TrackerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to load workflow progress")?;

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(tracker, renderer);

    info!("Restauro started");

    match command {
        None | Some(Status) => cli.status(),
        Some(Steps) => cli.steps(),
        Some(Toggle(target)) => cli.toggle(target).await,
        Some(Done(target)) => cli.set_done(target, true).await,
        Some(Undo(target)) => cli.set_done(target, false).await,
        Some(Reset(args)) => cli.reset(args.confirm).await,
        Some(Download(args)) => cli.download(&args.task, &args.output),
        Some(Artifact(args)) => cli.write_artifact(args.kind.into(), &args.output),
        Some(Vram(args)) => cli.vram(args.resolution, args.batch),
        Some(Bitrate(args)) => cli.bitrate(args.minutes, args.size),
        Some(Guide) => cli.guide(),
        Some(Chat(args)) => cli.chat(args).await,
        Some(Prompts) => cli.prompts(),
    }
}
