mod session;

use anyhow::Error;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use veneer_core::logging::{get_run_id, init_logging, shutdown_logging};
use veneer_core::settings::{Settings, SETTINGS_PATH};

#[derive(Parser)]
#[command(
    name = "veneer-demo",
    about = "Drives a scripted navigation session through the headless outline renderer"
)]
struct Args {
    /// Settings file, defaults are used when it doesn't exist
    #[arg(short, long, default_value = SETTINGS_PATH)]
    settings: PathBuf,

    /// Draw the bar with a custom text style instead of the native one
    #[arg(long)]
    custom_style: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let settings = Settings::load_or_default(&args.settings);

    init_logging(&settings.logging)?;
    eprintln!("veneer-demo run {}", get_run_id());

    let result = session::run(&settings, args.custom_style);
    if let Err(e) = &result {
        error!("session failed: {e:#}");
    }

    shutdown_logging();
    result
}
