//! Combat simulator binary.
//!
//! ```bash
//! # First encounter in the bundled content, default pacing
//! cargo run -p combat-client
//!
//! # Named encounter, no pacing delays
//! COMBAT_SEED=7 COMBAT_INSTANT=1 cargo run -p combat-client -- "Goblin Camp"
//! ```

use anyhow::Result;
use combat_client::SimConfig;
use combat_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimConfig::from_env();
    if let Some(name) = std::env::args().nth(1) {
        config.encounter = Some(name);
    }

    let runtime_config = if config.instant {
        RuntimeConfig::instant()
    } else {
        RuntimeConfig::from_env()
    };

    let report = combat_client::simulate(&config, runtime_config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
