//! Seeds every service database with demo data.
//!
//! Run with:
//! ```
//! cargo run -p demo-seeder --bin seed
//! ```

use std::process::ExitCode;

use anyhow::Context;
use demo_seeder::config::SeedConfig;
use demo_seeder::orchestrator::{LiveSteps, run};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env().context("invalid seeder configuration")?;

    let rng = match config.rng_seed {
        Some(seed) => {
            tracing::info!("Using RNG seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    tracing::info!("Starting demo data seeder...");

    let mut steps = LiveSteps::new(&config, rng);
    let report = run(&mut steps).await;

    Ok(report.exit_code())
}
