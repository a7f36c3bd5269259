/// Character registry: the cast and all mutable per-character state.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::character::{CastMember, Character, CharacterId, Personality};
use crate::schema::flag::Flag;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("duplicate character name: {0}")]
    DuplicateName(String),
    #[error("need at least 2 characters to draw a pair, have {0}")]
    NotEnoughCharacters(usize),
    #[error("unknown character: {0}")]
    UnknownCharacter(String),
}

/// One line of the popularity board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityEntry {
    pub name: String,
    pub personality: Personality,
    pub popularity: i32,
}

/// The cast, in the order characters were added.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    cast: Vec<Character>,
    index: FxHashMap<String, CharacterId>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a roster, failing on the first duplicate name.
    pub fn from_cast(cast: &[CastMember]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for member in cast {
            registry.add_character(member.name.clone(), member.personality)?;
        }
        Ok(registry)
    }

    /// Add a contestant with starting popularity and no flags.
    pub fn add_character(
        &mut self,
        name: impl Into<String>,
        personality: Personality,
    ) -> Result<CharacterId, RegistryError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        let id = CharacterId(self.cast.len());
        self.index.insert(name.clone(), id);
        self.cast.push(Character::new(name, personality));
        Ok(id)
    }

    pub fn id_of(&self, name: &str) -> Option<CharacterId> {
        self.index.get(name).copied()
    }

    /// Like `id_of`, but unknown names are an error.
    pub fn require(&self, name: &str) -> Result<CharacterId, RegistryError> {
        self.id_of(name)
            .ok_or_else(|| RegistryError::UnknownCharacter(name.to_string()))
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.cast.get(id.0)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.cast.get_mut(id.0)
    }

    pub fn name(&self, id: CharacterId) -> &str {
        self.get(id).map_or("", |c| c.name.as_str())
    }

    pub fn popularity(&self, id: CharacterId) -> i32 {
        self.get(id).map_or(0, |c| c.popularity)
    }

    /// Add `flag` to the directed set `from → to`.
    ///
    /// Returns true if the flag is new. Setting a flag toward oneself or
    /// for an id the registry never issued does nothing.
    pub fn set_relationship_flag(&mut self, from: CharacterId, to: CharacterId, flag: Flag) -> bool {
        if from == to {
            tracing::warn!(
                "ignoring self-directed flag '{}' on {}",
                flag,
                self.name(from)
            );
            return false;
        }
        let Some(to_name) = self.get(to).map(|c| c.name.clone()) else {
            return false;
        };
        match self.get_mut(from) {
            Some(character) => character.add_flag(&to_name, flag),
            None => false,
        }
    }

    /// True if `from` holds `flag` toward `to`.
    pub fn has_relationship_flag(&self, from: CharacterId, to: CharacterId, flag: &Flag) -> bool {
        match (self.get(from), self.get(to)) {
            (Some(from), Some(to)) => from.has_flag(&to.name, flag),
            _ => false,
        }
    }

    /// True if either character holds `flag` toward the other.
    pub fn either_has_flag(&self, a: CharacterId, b: CharacterId, flag: &Flag) -> bool {
        self.has_relationship_flag(a, b, flag) || self.has_relationship_flag(b, a, flag)
    }

    pub fn flag_count(&self, from: CharacterId, to: CharacterId) -> usize {
        match (self.get(from), self.get(to)) {
            (Some(from), Some(to)) => from.flag_count(&to.name),
            _ => 0,
        }
    }

    /// Popularity is unbounded in both directions.
    pub fn adjust_popularity(&mut self, id: CharacterId, delta: i32) {
        if let Some(character) = self.get_mut(id) {
            character.popularity = character.popularity.saturating_add(delta);
        }
    }

    /// Two different characters, uniform over ordered pairs.
    pub fn pick_distinct_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(CharacterId, CharacterId), RegistryError> {
        let n = self.cast.len();
        if n < 2 {
            return Err(RegistryError::NotEnoughCharacters(n));
        }
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        Ok((CharacterId(a), CharacterId(b)))
    }

    /// The popularity board in cast order.
    pub fn popularity_snapshot(&self) -> Vec<PopularityEntry> {
        self.cast
            .iter()
            .map(|c| PopularityEntry {
                name: c.name.clone(),
                personality: c.personality,
                popularity: c.popularity,
            })
            .collect()
    }

    /// The least popular character; ties go to whoever joined first.
    pub fn lowest_popularity(&self) -> Option<CharacterId> {
        let mut lowest: Option<(CharacterId, i32)> = None;
        for (i, character) in self.cast.iter().enumerate() {
            match lowest {
                Some((_, popularity)) if character.popularity >= popularity => {}
                _ => lowest = Some((CharacterId(i), character.popularity)),
            }
        }
        lowest.map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.cast.iter()
    }

    pub fn len(&self) -> usize {
        self.cast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cast.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::character::STARTING_POPULARITY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_registry() -> CharacterRegistry {
        CharacterRegistry::from_cast(&[
            CastMember::new("Tasha", Personality::Hothead),
            CastMember::new("Liam", Personality::Loyalist),
            CastMember::new("Zoe", Personality::Romantic),
        ])
        .unwrap()
    }

    #[test]
    fn add_character_defaults() {
        let registry = make_registry();
        let zoe = registry.id_of("Zoe").unwrap();
        assert_eq!(zoe, CharacterId(2));
        let character = registry.get(zoe).unwrap();
        assert_eq!(character.popularity, STARTING_POPULARITY);
        assert_eq!(character.personality, Personality::Romantic);
        assert_eq!(character.counterparts().count(), 0);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut registry = make_registry();
        assert_eq!(
            registry.add_character("Liam", Personality::Wildcard),
            Err(RegistryError::DuplicateName("Liam".to_string()))
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn require_unknown_name() {
        let registry = make_registry();
        assert!(registry.require("Tasha").is_ok());
        assert_eq!(
            registry.require("Marco"),
            Err(RegistryError::UnknownCharacter("Marco".to_string()))
        );
    }

    #[test]
    fn set_flag_is_idempotent() {
        let mut registry = make_registry();
        let (tasha, liam) = (CharacterId(0), CharacterId(1));
        assert!(registry.set_relationship_flag(tasha, liam, Flag::Friends));
        assert!(!registry.set_relationship_flag(tasha, liam, Flag::Friends));
        assert_eq!(registry.flag_count(tasha, liam), 1);
        assert!(registry.has_relationship_flag(tasha, liam, &Flag::Friends));
    }

    #[test]
    fn flags_are_asymmetric() {
        let mut registry = make_registry();
        let (tasha, liam) = (CharacterId(0), CharacterId(1));
        registry.set_relationship_flag(tasha, liam, Flag::Crush);
        assert!(registry.has_relationship_flag(tasha, liam, &Flag::Crush));
        assert!(!registry.has_relationship_flag(liam, tasha, &Flag::Crush));
        assert!(registry.either_has_flag(liam, tasha, &Flag::Crush));
    }

    #[test]
    fn self_flag_ignored() {
        let mut registry = make_registry();
        let tasha = CharacterId(0);
        assert!(!registry.set_relationship_flag(tasha, tasha, Flag::Crush));
        assert!(!registry.has_relationship_flag(tasha, tasha, &Flag::Crush));
    }

    #[test]
    fn unknown_ids_are_harmless() {
        let mut registry = make_registry();
        let ghost = CharacterId(99);
        assert!(!registry.set_relationship_flag(ghost, CharacterId(0), Flag::Rivals));
        assert!(!registry.set_relationship_flag(CharacterId(0), ghost, Flag::Rivals));
        assert!(!registry.has_relationship_flag(ghost, CharacterId(0), &Flag::Rivals));
        registry.adjust_popularity(ghost, 10);
        assert_eq!(registry.popularity(ghost), 0);
    }

    #[test]
    fn popularity_is_unbounded() {
        let mut registry = make_registry();
        let liam = CharacterId(1);
        registry.adjust_popularity(liam, -200);
        assert_eq!(registry.popularity(liam), -150);
        registry.adjust_popularity(liam, 1000);
        assert_eq!(registry.popularity(liam), 850);
    }

    #[test]
    fn pick_distinct_pair_never_repeats() {
        let registry = make_registry();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (a, b) = registry.pick_distinct_pair(&mut rng).unwrap();
            assert_ne!(a, b);
            assert!(a.0 < 3 && b.0 < 3);
        }
    }

    #[test]
    fn pick_distinct_pair_covers_all_ordered_pairs() {
        let registry = make_registry();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(registry.pick_distinct_pair(&mut rng).unwrap());
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn pick_distinct_pair_needs_two() {
        let mut registry = CharacterRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            registry.pick_distinct_pair(&mut rng),
            Err(RegistryError::NotEnoughCharacters(0))
        );
        registry.add_character("Solo", Personality::Wildcard).unwrap();
        assert_eq!(
            registry.pick_distinct_pair(&mut rng),
            Err(RegistryError::NotEnoughCharacters(1))
        );
    }

    #[test]
    fn snapshot_in_cast_order() {
        let mut registry = make_registry();
        registry.adjust_popularity(CharacterId(2), 7);
        let names: Vec<(String, i32)> = registry
            .popularity_snapshot()
            .into_iter()
            .map(|e| (e.name, e.popularity))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Tasha".to_string(), 50),
                ("Liam".to_string(), 50),
                ("Zoe".to_string(), 57),
            ]
        );
    }

    #[test]
    fn lowest_popularity_breaks_ties_by_cast_order() {
        let mut registry = make_registry();
        assert_eq!(registry.lowest_popularity(), Some(CharacterId(0)));

        registry.adjust_popularity(CharacterId(0), 5);
        assert_eq!(registry.lowest_popularity(), Some(CharacterId(1)));

        registry.adjust_popularity(CharacterId(2), -20);
        assert_eq!(registry.lowest_popularity(), Some(CharacterId(2)));

        registry.adjust_popularity(CharacterId(1), -20);
        assert_eq!(registry.lowest_popularity(), Some(CharacterId(1)));
    }

    #[test]
    fn lowest_popularity_empty() {
        assert_eq!(CharacterRegistry::new().lowest_popularity(), None);
    }
}
