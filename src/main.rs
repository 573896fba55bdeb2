//! Wallrun - Third-person wall-running movement demo
//!
//! Runs a scripted lap of a small course headlessly and prints what the
//! movement controller did.

mod demo;
mod settings;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::Settings;

/// Wall-clock length of the scripted lap
const RUN_SECONDS: f32 = 14.0;
/// Simulated render frame length, deliberately not a multiple of the fixed step
const FRAME_DELTA: f32 = 1.0 / 144.0;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting wallrun demo...");

    let settings = Settings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save().context("Failed to write settings")?;
    }

    let summary = demo::run(&settings, &demo::default_timeline(), RUN_SECONDS, FRAME_DELTA)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    info!("Done after {} steps", summary.steps);
    Ok(())
}
