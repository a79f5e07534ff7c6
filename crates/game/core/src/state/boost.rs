//! Temporary stat boosts granted by cards.

/// Stat affected by a temporary boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BoostStat {
    /// Percent points of crit chance.
    CritChance,
    /// Fractional bonus to stagger effectiveness (0.25 = +25%).
    StaggerBonus,
    /// Flat damage added to attack cards.
    Damage,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBoost {
    pub stat: BoostStat,
    pub amount: f32,
    pub remaining_turns: u32,
}

impl StatBoost {
    pub fn new(stat: BoostStat, amount: f32, remaining_turns: u32) -> Self {
        Self {
            stat,
            amount,
            remaining_turns,
        }
    }
}

/// Active boosts on a combatant. Boosts always stack.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBoosts {
    boosts: Vec<StatBoost>,
}

impl StatBoosts {
    pub fn add(&mut self, boost: StatBoost) {
        if boost.remaining_turns > 0 {
            self.boosts.push(boost);
        }
    }

    pub fn total(&self, stat: BoostStat) -> f32 {
        self.boosts
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum()
    }

    /// Decrements every boost and drops the expired ones.
    pub fn advance_one_turn(&mut self) {
        for boost in &mut self.boosts {
            boost.remaining_turns = boost.remaining_turns.saturating_sub(1);
        }
        self.boosts.retain(|b| b.remaining_turns > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatBoost> {
        self.boosts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boosts_sum_by_stat_and_expire() {
        let mut boosts = StatBoosts::default();
        boosts.add(StatBoost::new(BoostStat::CritChance, 10.0, 1));
        boosts.add(StatBoost::new(BoostStat::CritChance, 5.0, 2));
        boosts.add(StatBoost::new(BoostStat::Damage, 3.0, 2));

        assert_eq!(boosts.total(BoostStat::CritChance), 15.0);

        boosts.advance_one_turn();
        assert_eq!(boosts.total(BoostStat::CritChance), 5.0);
        assert_eq!(boosts.total(BoostStat::Damage), 3.0);

        boosts.advance_one_turn();
        assert!(boosts.is_empty());
    }
}
