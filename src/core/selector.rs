/// Event selection strategies.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::core::catalog::EventDefinition;
use crate::schema::character::Character;

/// The two participants of a round, in draw order.
#[derive(Debug, Clone, Copy)]
pub struct Pair<'r> {
    pub a: &'r Character,
    pub b: &'r Character,
}

/// Picks one event out of the eligible set.
///
/// Returning `None` means there is nothing to run this round.
pub trait EventSelector {
    fn select<'c>(
        &self,
        eligible: &[&'c EventDefinition],
        pair: Pair<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<&'c EventDefinition>;
}

/// Every eligible event is equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl EventSelector for UniformSelector {
    fn select<'c>(
        &self,
        eligible: &[&'c EventDefinition],
        _pair: Pair<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<&'c EventDefinition> {
        eligible.choose(rng).copied()
    }
}

/// Favors events written for the pair's personalities.
///
/// Each event starts at `base_weight`; a match on `preferred_a` or
/// `preferred_b` adds `match_bonus`. Nothing is ever excluded, so this
/// only shifts odds within the eligible set.
#[derive(Debug, Clone, Copy)]
pub struct PersonalityWeightedSelector {
    pub base_weight: u32,
    pub match_bonus: u32,
}

impl Default for PersonalityWeightedSelector {
    fn default() -> Self {
        Self {
            base_weight: 1,
            match_bonus: 2,
        }
    }
}

impl PersonalityWeightedSelector {
    pub fn weight(&self, event: &EventDefinition, pair: Pair<'_>) -> u32 {
        let mut weight = self.base_weight;
        if event.preferred_a.contains(&pair.a.personality) {
            weight += self.match_bonus;
        }
        if event.preferred_b.contains(&pair.b.personality) {
            weight += self.match_bonus;
        }
        weight
    }
}

impl EventSelector for PersonalityWeightedSelector {
    fn select<'c>(
        &self,
        eligible: &[&'c EventDefinition],
        pair: Pair<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<&'c EventDefinition> {
        if eligible.is_empty() {
            return None;
        }
        let weights: Vec<u32> = eligible.iter().map(|e| self.weight(e, pair)).collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => Some(eligible[dist.sample(rng)]),
            // All weights zero: fall back to uniform.
            Err(_) => eligible.choose(rng).copied(),
        }
    }
}
