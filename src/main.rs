use std::{path::Path, time::Duration};

use anyhow::Context;
use bom_radar::{
    DEFAULT_FRAME_DELAY, FetchConfig, ImagePathExtractor, RequestClient,
    WindowDisplay, fetch_radar_frames, preview_frames,
};
use clap::Parser;
use dotenv::dotenv;
use log::{LevelFilter, info};

mod cli;

use crate::cli::{Cli, Command};

// Blocks the runtime thread. Windows must be created on the main thread.
fn preview(dir: &Path, frame_delay: Duration) -> anyhow::Result<()> {
    let mut display = WindowDisplay::default();
    let summary = preview_frames(dir, frame_delay, &mut display)?;
    info!(
        "Previewed {} frame(s), skipped {}{}",
        summary.shown,
        summary.skipped,
        if summary.stopped { ", stopped early" } else { "" }
    );
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Command::Preview { dir, delay_ms }) = &cli.command {
        preview(dir, Duration::from_millis(*delay_ms))?;
        return Ok(());
    }

    let config = cli.apply_to(FetchConfig::new()?)?;
    let request_client = RequestClient::new().context("failed to build http client")?;
    let extractor = ImagePathExtractor::new()?;

    let frame_count = fetch_radar_frames(&request_client, &extractor, &config).await?;
    println!(
        "Downloaded {} radar frame(s) to {}",
        frame_count,
        config.output_dir.display()
    );

    if cli.preview {
        preview(&config.output_dir, DEFAULT_FRAME_DELAY)?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("bom-radar error: {:#}", err);
        std::process::exit(1);
    }
}
