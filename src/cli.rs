use std::{path::PathBuf, time::Duration};

use bom_radar::{DEFAULT_FRAME_DELAY, FetchConfig};
use clap::{Parser, Subcommand};

/// Download the latest BoM radar loop frames.
#[derive(Debug, Parser)]
#[command(name = "bom-radar", version, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory to save frames into (created if missing).
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir_arg: Option<PathBuf>,

    /// Directory to save frames into; takes precedence over OUTPUT_DIR.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Download at most this many frames.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Play the downloaded frames once they are saved.
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play the PNG frames already in a directory.
    Preview {
        /// Directory holding the frames.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Delay between frames in milliseconds.
        #[arg(long, default_value_t = DEFAULT_FRAME_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
}

impl Cli {
    /// Layers the command-line flags over the env-derived config.
    pub fn apply_to(&self, mut config: FetchConfig) -> anyhow::Result<FetchConfig> {
        if let Some(dir) = self.output_dir.as_ref().or(self.output_dir_arg.as_ref()) {
            config.output_dir = dir.clone();
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|timeout| !timeout.is_zero())
                .ok_or_else(|| {
                    anyhow::anyhow!("timeout must be a positive number of seconds, got {secs}")
                })?;
        }
        Ok(config)
    }
}
