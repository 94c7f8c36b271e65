use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod dispatch;
mod render;

use dispatch::{resolve_agent_config, run_cli};

#[derive(Parser, Debug)]
#[command(name = "fieldcam-agent")]
#[command(about = "Management agent for FieldCam devices", long_about = None)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    storage_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Verify {
        #[arg(long)]
        json: bool,
    },
    Apply,
    Status {
        #[arg(long)]
        json: bool,
    },
    Doctor,
    Version,
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_agent_config(&cli)?;
    init_tracing(config.log_filter.as_deref());
    run_cli(cli, &config)
}

fn init_tracing(config_filter: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config_filter.unwrap_or("info")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
