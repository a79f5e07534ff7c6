//! The active enemy wave.
//!
//! The roster is the single source of truth for enemy membership. Defeated
//! enemies stay in it (so their death animation can play) until the engine
//! removes them through `complete_despawn` or a reconciliation pass.

use crate::state::{Combatant, CombatantId};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave {
    /// 1-based wave number.
    pub index: u32,
    pub total_waves: u32,
    /// Enemies ordered by slot.
    roster: Vec<Combatant>,
    pub boss_slot: Option<usize>,
}

impl Wave {
    pub fn new(index: u32, total_waves: u32, mut roster: Vec<Combatant>, boss_slot: Option<usize>) -> Self {
        roster.sort_by_key(|c| c.slot);
        Self {
            index,
            total_waves,
            roster,
            boss_slot,
        }
    }

    pub fn is_final(&self) -> bool {
        self.index >= self.total_waves
    }

    pub fn enemy(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.iter().find(|c| c.id == id)
    }

    pub fn enemy_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.iter_mut().find(|c| c.id == id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.roster.iter()
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.roster.iter_mut()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.roster.iter().filter(|c| !c.is_defeated())
    }

    /// Ids of living enemies in slot order.
    pub fn living_ids(&self) -> Vec<CombatantId> {
        self.living().map(|c| c.id).collect()
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    /// True once no living enemy remains. An empty wave is already cleared.
    pub fn is_cleared(&self) -> bool {
        self.living_count() == 0
    }

    /// Living enemy occupying the given slot.
    pub fn target_at(&self, slot: usize) -> Option<CombatantId> {
        self.living().find(|c| c.slot == slot).map(|c| c.id)
    }

    /// Defeated enemies still on the roster.
    pub fn pending_despawns(&self) -> Vec<CombatantId> {
        self.roster
            .iter()
            .filter(|c| c.is_defeated())
            .map(|c| c.id)
            .collect()
    }

    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.roster.iter().position(|c| c.id == id)?;
        Some(self.roster.remove(index))
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn clear(&mut self) {
        self.roster.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(id: u32, slot: usize, health: u32) -> Combatant {
        Combatant::new(CombatantId(id), format!("e{id}"), 10)
            .with_health(health)
            .with_slot(slot)
    }

    #[test]
    fn roster_is_sorted_by_slot() {
        let wave = Wave::new(1, 2, vec![enemy(1, 2, 10), enemy(2, 0, 10), enemy(3, 1, 10)], None);
        assert_eq!(
            wave.living_ids(),
            vec![CombatantId(2), CombatantId(3), CombatantId(1)]
        );
        assert_eq!(wave.target_at(2), Some(CombatantId(1)));
    }

    #[test]
    fn defeated_members_stay_until_removed() {
        let mut wave = Wave::new(1, 1, vec![enemy(1, 0, 0), enemy(2, 1, 10)], None);

        assert_eq!(wave.living_count(), 1);
        assert_eq!(wave.pending_despawns(), vec![CombatantId(1)]);
        assert_eq!(wave.target_at(0), None);

        assert!(wave.remove(CombatantId(1)).is_some());
        assert!(wave.remove(CombatantId(1)).is_none());
        assert!(wave.pending_despawns().is_empty());
    }

    #[test]
    fn empty_wave_counts_as_cleared() {
        let wave = Wave::new(2, 3, Vec::new(), None);
        assert!(wave.is_cleared());
        assert!(!wave.is_final());
    }
}
