use std::sync::Arc;

use super::*;
use crate::action::{AbilityEffect, AbilityTrigger, CardKind, EnemyAbility, EnemyIntent, IntentSpec};
use crate::env::{CyclingDeck, EnemyTemplate, FixedRng, StaticCatalog};
use crate::state::{StatusEffect, StatusEffectKind};

fn attack(power: f32) -> IntentSpec {
    IntentSpec::new(EnemyIntent::Attack {
        power,
        energy_cost: 0,
    })
}

fn catalog() -> Arc<dyn ContentCatalog> {
    Arc::new(StaticCatalog::new(vec![
        EnemyTemplate::new("dummy", "Dummy", 10, 4).with_intent(attack(1.0)),
        EnemyTemplate::new("brute", "Brute", 100, 4)
            .with_stagger_threshold(1.0)
            .with_intent(attack(1.0)),
        EnemyTemplate::new("charger", "Charger", 30, 4).with_intent(attack(2.0).delayed(1)),
        EnemyTemplate::new("thorn", "Thorn", 30, 0).with_ability(EnemyAbility {
            trigger: AbilityTrigger::TurnStart,
            effect: AbilityEffect::Retaliate { damage_per_card: 2 },
        }),
        EnemyTemplate::new("sluggish", "Sluggish", 30, 5)
            .with_energy(2, 0, 1)
            .with_intent(IntentSpec::new(EnemyIntent::Attack {
                power: 1.0,
                energy_cost: 2,
            })),
    ]))
}

fn encounter(pool: &str, waves: u32, per_wave: u32) -> EncounterDefinition {
    EncounterDefinition::new("trial", waves, per_wave).with_pool([pool], true)
}

fn hero() -> Combatant {
    Combatant::player("Hero", 50, 3)
}

fn slash() -> CardIntent {
    CardIntent::strike("Slash", 1, 10)
}

fn engine(encounter: EncounterDefinition, deck: Vec<CardIntent>, player: Combatant) -> CombatEngine {
    CombatEngine::new(
        CombatConfig::default(),
        encounter,
        catalog(),
        Box::new(CyclingDeck::new(deck)),
        player,
        // d100 always rolls 100: no misses, no rolled crits, common rarity.
        Dice::new(FixedRng(99), 0),
    )
}

fn count(events: &[CombatEvent], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

/// Ends the player turn and runs every enemy action.
fn run_enemy_turn(engine: &mut CombatEngine) -> NextStep {
    let mut step = engine.end_player_turn().expect("end turn accepted");
    while let NextStep::EnemyTurn { .. } = step {
        step = engine.act_next_enemy().expect("enemy acts");
    }
    step
}

fn enemy_in_slot(engine: &CombatEngine, slot: usize) -> &Combatant {
    engine
        .wave()
        .enemies()
        .find(|e| e.slot == slot)
        .expect("enemy in slot")
}

#[test]
fn start_spawns_first_wave_and_opens_player_turn() {
    let mut engine = engine(encounter("dummy", 2, 2), vec![slash()], hero());
    let step = engine.start().expect("start");

    assert_eq!(step, NextStep::AwaitPlayerInput);
    assert_eq!(engine.state(), CombatState::PlayerTurn);
    assert_eq!(engine.turn(), 1);
    assert_eq!(engine.wave().index, 1);
    assert_eq!(engine.wave().living_count(), 2);
    // per-wave allotment + per-turn allotment
    assert_eq!(engine.hand().len(), 7);
    assert!(engine.wave().enemies().all(|e| e.intent.is_some()));

    assert_eq!(engine.start(), Err(CombatError::AlreadyStarted));
}

#[test]
fn clearing_a_wave_transitions_once_and_repopulates() {
    let mut engine = engine(encounter("dummy", 3, 2), vec![slash()], hero());
    engine.start().expect("start");
    engine.drain_events();

    assert_eq!(engine.play_from_hand(0, Some(0)), Ok(NextStep::AwaitPlayerInput));
    assert_eq!(engine.play_from_hand(0, Some(1)), Ok(NextStep::WaveCleared));
    assert!(engine.is_transition_in_flight());

    // Further intents are rejected until the transition completes.
    assert_eq!(engine.end_player_turn(), Err(CombatError::TransitionInFlight));
    assert_eq!(
        engine.play_from_hand(0, None),
        Err(CombatError::TransitionInFlight)
    );

    let events = engine.drain_events();
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyDefeated(_))), 2);
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::WaveCleared { .. })), 1);
    assert_eq!(engine.defeated().len(), 2);

    let old_ids: Vec<_> = engine.wave().enemies().map(|e| e.id).collect();
    let new_ids = engine.advance_wave().expect("advance");
    assert_eq!(engine.wave().index, 2);
    assert_eq!(new_ids.len(), 2);
    assert!(new_ids.iter().all(|id| !old_ids.contains(id)));
    // 5 left in hand + 5 per-wave cards.
    assert_eq!(engine.hand().len(), 10);

    assert_eq!(engine.resume_after_wave(), Ok(NextStep::AwaitPlayerInput));
    assert_eq!(engine.state(), CombatState::PlayerTurn);
    assert!(!engine.is_transition_in_flight());
    assert_eq!(engine.resume_after_wave(), Err(CombatError::NoPendingTransition));
}

#[test]
fn area_attack_killing_everyone_triggers_one_transition() {
    let cleave = CardIntent::sweep("Cleave", 1, 10);
    let mut engine = engine(encounter("dummy", 3, 3), vec![cleave], hero());
    engine.start().expect("start");
    engine.drain_events();

    assert_eq!(engine.play_from_hand(0, None), Ok(NextStep::WaveCleared));

    let events = engine.drain_events();
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyDefeated(_))), 3);
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::WaveCleared { .. })), 1);
    assert_eq!(engine.waves_cleared(), 1);
}

#[test]
fn mixed_single_and_area_kills_trigger_one_transition() {
    let cleave = CardIntent::sweep("Cleave", 1, 10);
    let mut engine = engine(encounter("dummy", 3, 3), vec![slash(), cleave], hero());
    engine.start().expect("start");
    engine.drain_events();

    assert_eq!(engine.hand()[0].name, "Slash");
    assert_eq!(engine.play_from_hand(0, Some(0)), Ok(NextStep::AwaitPlayerInput));
    assert_eq!(engine.hand()[0].name, "Cleave");
    assert_eq!(engine.play_from_hand(0, None), Ok(NextStep::WaveCleared));

    let events = engine.drain_events();
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyDefeated(_))), 3);
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::WaveCleared { .. })), 1);
    assert_eq!(engine.waves_cleared(), 1);
    assert!(engine.is_transition_in_flight());
}

#[test]
fn clearing_the_final_wave_is_victory() {
    let mut engine = engine(encounter("dummy", 1, 1), vec![slash()], hero());
    engine.start().expect("start");

    assert_eq!(
        engine.play_from_hand(0, None),
        Ok(NextStep::Finished(CombatOutcome::Victory))
    );
    assert_eq!(engine.state(), CombatState::Victory);
    assert_eq!(engine.waves_cleared(), 1);
    assert_eq!(
        engine.play_from_hand(0, None),
        Err(CombatError::CombatOver(CombatOutcome::Victory))
    );

    let events = engine.drain_events();
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::CombatEnded { .. })), 1);
}

#[test]
fn frozen_player_skips_turn_without_ticks_or_draws() {
    let mut player = hero();
    player
        .status
        .add(StatusEffect::new(StatusEffectKind::Frozen, 1.0, 1));
    let mut engine = engine(encounter("dummy", 1, 2), vec![slash()], player);

    let step = engine.start().expect("start");
    assert_eq!(step, NextStep::SkipPlayerTurn(StatusEffectKind::Frozen));
    assert_eq!(engine.hand().len(), 5);
    assert_eq!(engine.counters(), TurnCounters::default());
    assert_eq!(
        engine.play_from_hand(0, None),
        Err(CombatError::PlayerIncapacitated(StatusEffectKind::Frozen))
    );
    // The freeze did not tick at the skipped entry.
    assert!(engine.player().status.is_frozen());

    let step = engine.end_player_turn().expect("auto end");
    assert_eq!(step, NextStep::EnemyTurn { pending: 2 });
    assert_eq!(engine.cards_played_snapshot(), 0);
    assert!(!engine.player().status.is_frozen());
}

#[test]
fn enemy_attacks_can_defeat_the_player() {
    let player = hero().with_health(4);
    let mut engine = engine(encounter("dummy", 1, 2), vec![slash()], player);
    engine.start().expect("start");

    assert_eq!(engine.end_player_turn(), Ok(NextStep::EnemyTurn { pending: 2 }));
    assert_eq!(
        engine.act_next_enemy(),
        Ok(NextStep::Finished(CombatOutcome::Defeat))
    );
    assert_eq!(engine.state(), CombatState::Defeat);
    assert_eq!(engine.player().health(), 0);
    assert_eq!(
        engine.act_next_enemy(),
        Err(CombatError::CombatOver(CombatOutcome::Defeat))
    );
}

#[test]
fn full_round_returns_to_player_with_damage_taken() {
    let mut engine = engine(encounter("dummy", 1, 2), vec![slash()], hero());
    engine.start().expect("start");

    assert_eq!(run_enemy_turn(&mut engine), NextStep::AwaitPlayerInput);
    assert_eq!(engine.turn(), 2);
    assert_eq!(engine.player().health(), 42);
    assert_eq!(engine.hand().len(), 9);
}

#[test]
fn insufficient_mana_rejects_without_side_effects() {
    let heavy = CardIntent::strike("Crush", 5, 30);
    let mut engine = engine(encounter("dummy", 1, 1), vec![heavy], hero());
    engine.start().expect("start");
    let hand_before = engine.hand().len();

    assert_eq!(
        engine.play_from_hand(0, None),
        Err(CombatError::InsufficientMana {
            needed: 5,
            available: 3
        })
    );
    assert_eq!(engine.hand().len(), hand_before);
    assert_eq!(engine.counters().cards_played, 0);
    assert_eq!(enemy_in_slot(&engine, 0).health(), 10);
}

#[test]
fn invalid_slots_and_hand_indices_are_rejected() {
    let mut engine = engine(encounter("dummy", 1, 1), vec![slash()], hero());
    engine.start().expect("start");

    assert_eq!(engine.play_from_hand(0, Some(4)), Err(CombatError::InvalidTarget(4)));
    assert_eq!(engine.play_from_hand(42, None), Err(CombatError::CardNotInHand(42)));
    assert_eq!(engine.select_target(3), Err(CombatError::InvalidTarget(3)));
}

#[test]
fn statuses_advance_once_per_boundary() {
    let venom = CardIntent::new(
        "Venom",
        0,
        CardKind::Hex {
            effect: StatusEffect::new(StatusEffectKind::Poisoned, 1.0, 4),
        },
    );
    let mut engine = engine(encounter("dummy", 1, 2), vec![venom], hero());
    engine.start().expect("start");
    engine.play_from_hand(0, Some(0)).expect("hex");

    let remaining = |engine: &CombatEngine| {
        enemy_in_slot(engine, 0)
            .status
            .iter()
            .next()
            .map(|e| e.remaining_turns)
    };
    assert_eq!(remaining(&engine), Some(4));

    engine.end_player_turn().expect("end turn");
    assert_eq!(remaining(&engine), Some(3));
    assert_eq!(enemy_in_slot(&engine, 0).health(), 9);

    let mut step = NextStep::EnemyTurn { pending: 2 };
    while let NextStep::EnemyTurn { .. } = step {
        step = engine.act_next_enemy().expect("enemy acts");
    }
    assert_eq!(step, NextStep::AwaitPlayerInput);
    assert_eq!(remaining(&engine), Some(2));
    assert_eq!(enemy_in_slot(&engine, 0).health(), 8);
}

#[test]
fn periodic_death_is_reported_once_and_reconciled() {
    let venom = CardIntent::new(
        "Venom",
        0,
        CardKind::Hex {
            effect: StatusEffect::new(StatusEffectKind::Poisoned, 20.0, 3),
        },
    );
    let mut engine = engine(encounter("dummy", 2, 2), vec![venom], hero());
    engine.start().expect("start");
    engine.play_from_hand(0, Some(0)).expect("hex");
    engine.drain_events();

    let step = engine.end_player_turn().expect("end turn");
    // Only the surviving enemy acts.
    assert_eq!(step, NextStep::EnemyTurn { pending: 1 });
    assert_eq!(engine.defeated().len(), 1);

    let mut step = step;
    while let NextStep::EnemyTurn { .. } = step {
        step = engine.act_next_enemy().expect("enemy acts");
    }

    let events = engine.drain_events();
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyDefeated(_))), 1);
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::EnemyRemoved { forced: true, .. })),
        1
    );
    assert_eq!(engine.wave().len(), 1);
    assert_eq!(engine.player().health(), 46);
}

#[test]
fn complete_despawn_removes_only_defeated_enemies() {
    let mut engine = engine(encounter("dummy", 2, 2), vec![slash()], hero());
    engine.start().expect("start");
    let living = enemy_in_slot(&engine, 1).id;

    engine.play_from_hand(0, Some(0)).expect("strike");
    let dead = engine.defeated()[0].id;

    assert!(!engine.complete_despawn(living));
    assert!(engine.complete_despawn(dead));
    assert!(!engine.complete_despawn(dead));
    assert_eq!(engine.wave().len(), 1);
    assert_eq!(engine.defeated().len(), 1);
}

#[test]
fn delayed_card_fires_at_a_later_player_turn() {
    let slow = CardIntent::strike("Bolt", 1, 3).with_delay(1);
    let mut engine = engine(encounter("brute", 1, 1), vec![slow], hero());
    engine.start().expect("start");

    engine.play_from_hand(0, None).expect("delayed strike");
    assert_eq!(enemy_in_slot(&engine, 0).health(), 100);
    assert_eq!(engine.player().delayed.len(), 1);

    run_enemy_turn(&mut engine);
    assert_eq!(enemy_in_slot(&engine, 0).health(), 97);
    assert!(engine.player().delayed.is_empty());
}

#[test]
fn delayed_enemy_intent_fires_on_its_next_action() {
    let mut engine = engine(encounter("charger", 1, 1), vec![slash()], hero());
    engine.start().expect("start");
    engine.drain_events();

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 50);
    let events = engine.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::EnemyActionDelayed { turns: 1, .. })),
        1
    );

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 42);
}

#[test]
fn stagger_stun_costs_the_enemy_exactly_one_action() {
    let mut engine = engine(encounter("brute", 1, 1), vec![slash()], hero());
    engine.start().expect("start");

    engine.play_from_hand(0, None).expect("strike");
    assert!(enemy_in_slot(&engine, 0).status.is_stunned());
    engine.drain_events();

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 50);
    let events = engine.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::EnemyTurnSkipped { .. })),
        1
    );
    assert!(enemy_in_slot(&engine, 0).intent.is_some());
    assert!(!enemy_in_slot(&engine, 0).status.is_stunned());

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 46);
}

fn hex(name: &str, kind: StatusEffectKind, turns: u32) -> CardIntent {
    CardIntent::new(
        name,
        0,
        CardKind::Hex {
            effect: StatusEffect::new(kind, 0.0, turns),
        },
    )
}

#[test]
fn hexed_freeze_costs_the_enemy_exactly_one_action() {
    let frost = hex("Frost", StatusEffectKind::Frozen, 1);
    let mut engine = engine(encounter("dummy", 1, 1), vec![frost], hero());
    engine.start().expect("start");

    engine.play_from_hand(0, Some(0)).expect("hex");
    assert!(enemy_in_slot(&engine, 0).status.is_frozen());
    engine.drain_events();

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 50);
    let events = engine.drain_events();
    assert_eq!(
        count(&events, |e| matches!(
            e,
            CombatEvent::EnemyTurnSkipped {
                reason: StatusEffectKind::Frozen,
                ..
            }
        )),
        1
    );
    assert!(!enemy_in_slot(&engine, 0).status.is_frozen());

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 46);
}

#[test]
fn stunned_enemy_holds_its_delayed_action() {
    let daze = hex("Daze", StatusEffectKind::Stunned, 1);
    let mut engine = engine(encounter("charger", 1, 1), vec![daze], hero());
    engine.start().expect("start");

    // The charger queues its heavy attack.
    run_enemy_turn(&mut engine);
    assert_eq!(enemy_in_slot(&engine, 0).delayed.len(), 1);

    engine.play_from_hand(0, Some(0)).expect("hex");
    engine.drain_events();

    run_enemy_turn(&mut engine);
    let events = engine.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::EnemyTurnSkipped { .. })),
        1
    );
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::AttackResolved { .. })),
        0
    );
    assert_eq!(engine.player().health(), 50);
    assert_eq!(enemy_in_slot(&engine, 0).delayed.len(), 1);

    // Released from the stun, the held attack lands.
    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 42);
}

#[test]
fn retaliation_scales_with_cards_played() {
    let focus = CardIntent::new("Focus", 0, CardKind::Mend { amount: 0 });
    let mut engine = engine(encounter("thorn", 1, 1), vec![focus], hero());
    engine.start().expect("start");

    for _ in 0..3 {
        engine.play_from_hand(0, None).expect("focus");
    }
    assert_eq!(engine.counters().cards_played, 3);

    run_enemy_turn(&mut engine);
    assert_eq!(engine.cards_played_snapshot(), 3);
    assert_eq!(engine.player().health(), 44);
}

#[test]
fn enemy_waits_for_energy_before_acting() {
    let mut engine = engine(encounter("sluggish", 1, 1), vec![slash()], hero());
    engine.start().expect("start");
    engine.drain_events();

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 50);
    let events = engine.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::EnemyEnergyShort { needed: 2, available: 1, .. })),
        1
    );

    run_enemy_turn(&mut engine);
    assert_eq!(engine.player().health(), 45);
}

#[test]
fn prepared_card_enters_hand_after_charging() {
    let prepare = CardIntent::new(
        "Wind Up",
        0,
        CardKind::Prepare {
            card: Box::new(CardIntent::strike("Haymaker", 2, 25)),
            charge_turns: 1,
        },
    );
    let mut engine = engine(encounter("brute", 1, 1), vec![prepare], hero());
    engine.start().expect("start");

    engine.play_from_hand(0, None).expect("prepare");
    assert_eq!(engine.prepared().len(), 1);

    run_enemy_turn(&mut engine);
    assert!(engine.prepared().is_empty());
    assert!(engine.hand().iter().any(|c| c.name == "Haymaker"));
}

#[test]
fn selected_target_is_used_when_no_slot_is_given() {
    let mut engine = engine(encounter("dummy", 1, 2), vec![slash()], hero());
    engine.start().expect("start");

    let id = engine.select_target(1).expect("select");
    engine.play_from_hand(0, None).expect("strike");

    assert!(engine.wave().enemy(id).is_some_and(|e| e.is_defeated()));
    assert_eq!(enemy_in_slot(&engine, 0).health(), 10);
    assert_eq!(engine.target(), None);
}

#[test]
fn empty_final_wave_is_immediate_victory() {
    let encounter = EncounterDefinition::new("void", 1, 3).with_pool(["missing"], true);
    let mut engine = CombatEngine::new(
        CombatConfig::default(),
        encounter,
        Arc::new(StaticCatalog::default()),
        Box::new(CyclingDeck::default()),
        hero(),
        Dice::seeded(1),
    );

    assert_eq!(engine.start(), Ok(NextStep::Finished(CombatOutcome::Victory)));
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let mut engine = CombatEngine::new(
            CombatConfig::default(),
            EncounterDefinition::new("replay", 2, 3),
            catalog(),
            Box::new(CyclingDeck::new(vec![slash()])),
            hero(),
            Dice::seeded(seed),
        );
        engine.start().expect("start");
        let _ = engine.play_from_hand(0, None);
        run_enemy_turn(&mut engine);
        engine.drain_events()
    };

    assert_eq!(run(9), run(9));
}
