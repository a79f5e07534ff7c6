//! Gold bounties for defeated enemies.

use combat_core::{CombatOutcome, DefeatedEnemy, EnemyTemplate, Rarity};
use combat_runtime::LootAndProgression;
use serde::Serialize;

/// Gold granted for one defeat, or for the encounter as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bounty {
    pub source: String,
    pub gold: u32,
}

/// Pays gold by enemy tier and rarity, plus a clear bonus on victory.
#[derive(Clone, Debug)]
pub struct BountyBoard {
    pub gold_per_tier: u32,
    pub victory_bonus_per_kill: u32,
    total: u32,
}

impl Default for BountyBoard {
    fn default() -> Self {
        Self {
            gold_per_tier: 10,
            victory_bonus_per_kill: 5,
            total: 0,
        }
    }
}

impl BountyBoard {
    /// Gold paid out so far.
    pub fn total(&self) -> u32 {
        self.total
    }

    fn pay(&mut self, source: String, gold: u32) -> Bounty {
        self.total = self.total.saturating_add(gold);
        Bounty { source, gold }
    }
}

fn rarity_multiplier(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 1,
        Rarity::Uncommon => 2,
        Rarity::Rare => 3,
        Rarity::Elite => 5,
        Rarity::Boss => 10,
    }
}

impl LootAndProgression for BountyBoard {
    type Reward = Bounty;

    fn on_enemy_defeated(
        &mut self,
        template: Option<&EnemyTemplate>,
        enemy: &DefeatedEnemy,
        _defeated: &[DefeatedEnemy],
    ) -> Option<Bounty> {
        // Enemies without a catalog entry carry no bounty.
        let template = template?;
        let gold = self.gold_per_tier * template.tier.max(1) * rarity_multiplier(enemy.rarity);
        Some(self.pay(enemy.name.clone(), gold))
    }

    fn on_combat_ended(
        &mut self,
        outcome: CombatOutcome,
        defeated: &[DefeatedEnemy],
    ) -> Option<Bounty> {
        match outcome {
            CombatOutcome::Victory => {
                let gold = self.victory_bonus_per_kill * defeated.len() as u32;
                Some(self.pay("victory".to_string(), gold))
            }
            CombatOutcome::Defeat => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use combat_core::CombatantId;

    use super::*;

    fn defeated(rarity: Rarity) -> DefeatedEnemy {
        DefeatedEnemy {
            id: CombatantId(1),
            name: "Goblin".to_string(),
            template: Some("goblin".to_string()),
            rarity,
            tier: 2,
            wave: 1,
            turn: 1,
        }
    }

    #[test]
    fn pays_by_tier_and_rarity() {
        let mut board = BountyBoard::default();
        let mut template = EnemyTemplate::new("goblin", "Goblin", 20, 4);
        template.tier = 2;
        let enemy = defeated(Rarity::Rare);

        let bounty = board
            .on_enemy_defeated(Some(&template), &enemy, std::slice::from_ref(&enemy))
            .unwrap();
        assert_eq!(bounty.gold, 60);

        let bonus = board
            .on_combat_ended(CombatOutcome::Victory, std::slice::from_ref(&enemy))
            .unwrap();
        assert_eq!(bonus.gold, 5);
        assert_eq!(board.total(), 65);
    }

    #[test]
    fn defeat_and_unknown_enemies_pay_nothing() {
        let mut board = BountyBoard::default();
        let enemy = defeated(Rarity::Boss);

        assert!(board.on_enemy_defeated(None, &enemy, &[]).is_none());
        assert!(board.on_combat_ended(CombatOutcome::Defeat, &[enemy]).is_none());
        assert_eq!(board.total(), 0);
    }
}
