//! Headless combat simulator.
//!
//! Loads combat content from a data directory, runs one encounter through
//! [`combat_runtime::Runtime`] with an automatic player, and reports the
//! result.
pub mod config;
pub mod loot;
pub mod player;
pub mod presenter;

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{Combatant, ContentCatalog, CyclingDeck};
use combat_runtime::{CombatReport, Runtime, RuntimeConfig};

pub use config::SimConfig;
pub use loot::{Bounty, BountyBoard};
pub use player::AutoPlayer;
pub use presenter::LogPresenter;

/// Loads content for `config` and plays the encounter to the end.
pub async fn simulate(
    config: &SimConfig,
    runtime_config: RuntimeConfig,
) -> Result<CombatReport<Bounty>> {
    let factory = ContentFactory::new(&config.content_dir);

    let rules = factory.load_config()?;
    let catalog = factory.load_catalog()?;
    let deck = factory.load_deck()?;
    let encounter = match &config.encounter {
        Some(name) => factory.load_encounter(name)?,
        None => factory
            .load_encounters()?
            .into_iter()
            .next()
            .with_context(|| format!("no encounters in {}", factory.data_dir().display()))?,
    };

    let dangling = catalog.dangling_minions();
    if !dangling.is_empty() {
        tracing::warn!(?dangling, "catalog references unknown minions");
    }

    tracing::info!(
        encounter = %encounter.name,
        waves = encounter.total_waves,
        enemies = catalog.len(),
        cards = deck.len(),
        seed = config.seed,
        "content loaded"
    );

    let catalog: Arc<dyn ContentCatalog> = Arc::new(catalog);
    let player = Combatant::player(
        config.player_name.clone(),
        config.player_health,
        config.player_mana,
    );

    let runtime = Runtime::builder()
        .config(runtime_config)
        .combat_config(rules)
        .encounter(encounter)
        .catalog(catalog)
        .cards(CyclingDeck::new(deck))
        .player(player)
        .seed(config.seed)
        .presenter(Arc::new(LogPresenter))
        .loot(BountyBoard::default())
        .build()?;

    let report = runtime.play(&AutoPlayer::default()).await?;
    Ok(report)
}
