use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::flag::Flag;

/// Every contestant enters the house with this popularity.
pub const STARTING_POPULARITY: i32 = 50;

/// Index of a character in the cast. Issued by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

/// Personality archetype of a contestant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    Romantic,
    Hothead,
    SocialClimber,
    Loyalist,
    Wildcard,
}

impl Personality {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Romantic => "Romantic",
            Self::Hothead => "Hothead",
            Self::SocialClimber => "SocialClimber",
            Self::Loyalist => "Loyalist",
            Self::Wildcard => "Wildcard",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A roster entry: what a cast file lists for each contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub personality: Personality,
}

impl CastMember {
    pub fn new(name: impl Into<String>, personality: Personality) -> Self {
        Self {
            name: name.into(),
            personality,
        }
    }
}

/// A contestant and everything the simulation tracks about them.
///
/// Relationship flags are keyed by the counterpart's name and only
/// ever grow; there is no removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub personality: Personality,
    pub popularity: i32,
    relationships: FxHashMap<String, FxHashSet<Flag>>,
    pub tags: FxHashSet<String>,
}

impl Character {
    pub fn new(name: impl Into<String>, personality: Personality) -> Self {
        Self {
            name: name.into(),
            personality,
            popularity: STARTING_POPULARITY,
            relationships: FxHashMap::default(),
            tags: FxHashSet::default(),
        }
    }

    /// True if this character holds `flag` toward `other`.
    pub fn has_flag(&self, other: &str, flag: &Flag) -> bool {
        self.relationships
            .get(other)
            .is_some_and(|flags| flags.contains(flag))
    }

    /// Add `flag` toward `other`. Returns true if it was not already held.
    ///
    /// Flags toward oneself are never stored.
    pub fn add_flag(&mut self, other: &str, flag: Flag) -> bool {
        if other == self.name {
            return false;
        }
        self.relationships
            .entry(other.to_string())
            .or_default()
            .insert(flag)
    }

    /// The flags held toward `other`, if any were ever set.
    pub fn flags_toward(&self, other: &str) -> Option<&FxHashSet<Flag>> {
        self.relationships.get(other)
    }

    /// The flags held toward `other`, sorted for stable output.
    pub fn sorted_flags_toward(&self, other: &str) -> Vec<Flag> {
        let mut flags: Vec<Flag> = self
            .flags_toward(other)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        flags.sort();
        flags
    }

    /// Number of flags held toward `other`.
    pub fn flag_count(&self, other: &str) -> usize {
        self.flags_toward(other).map_or(0, |flags| flags.len())
    }

    /// Names of every counterpart this character holds at least one flag toward.
    pub fn counterparts(&self) -> impl Iterator<Item = &str> {
        self.relationships.keys().map(String::as_str)
    }

    /// Returns true if this character has the given personal tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true if this character has ALL of the given personal tags.
    pub fn has_all_tags(&self, tags: &[&str]) -> bool {
        tags.iter().all(|tag| self.tags.contains(*tag))
    }
}
