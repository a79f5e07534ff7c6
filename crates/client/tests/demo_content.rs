//! Runs the bundled demo content end to end.

use combat_client::{SimConfig, simulate};
use combat_content::ContentFactory;
use combat_core::CombatOutcome;
use combat_runtime::RuntimeConfig;

#[test]
fn bundled_content_loads() {
    let factory = ContentFactory::new(SimConfig::default().content_dir);

    let catalog = factory.load_catalog().unwrap();
    assert!(catalog.dangling_minions().is_empty());

    let encounters = factory.load_encounters().unwrap();
    assert_eq!(encounters.len(), 2);
    for encounter in &encounters {
        assert!(
            combat_content::EncounterLoader::unknown_keys(encounter, &catalog).is_empty(),
            "{} references unknown enemies",
            encounter.name
        );
    }

    assert!(factory.load_deck().unwrap().len() >= 10);
    assert_eq!(factory.load_config().unwrap().cards_per_wave, 5);
}

#[tokio::test]
async fn every_encounter_runs_to_completion() {
    for name in ["Goblin Camp", "Forest Road"] {
        let config = SimConfig {
            encounter: Some(name.to_string()),
            seed: 7,
            ..SimConfig::default()
        };
        let report = simulate(&config, RuntimeConfig::instant()).await.unwrap();

        // Every demo enemy comes from the catalog, so each defeat pays.
        assert_eq!(report.rewards.len(), report.defeated.len(), "{name}");
        match report.outcome {
            CombatOutcome::Victory => {
                assert!(report.player_health > 0);
                assert!(report.final_reward.is_some());
            }
            CombatOutcome::Defeat => {
                assert_eq!(report.player_health, 0);
                assert!(report.final_reward.is_none());
            }
        }
    }
}

#[tokio::test]
async fn same_seed_replays_identically() {
    let config = SimConfig {
        seed: 11,
        ..SimConfig::default()
    };

    let first = simulate(&config, RuntimeConfig::instant()).await.unwrap();
    let second = simulate(&config, RuntimeConfig::instant()).await.unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.turns, second.turns);
    assert_eq!(first.defeated, second.defeated);
    assert_eq!(first.rewards, second.rewards);
}
