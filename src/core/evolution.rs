/// Relationship evolution: probabilistic flag transitions after each event.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EvolutionConfig;
use crate::core::registry::CharacterRegistry;
use crate::schema::character::CharacterId;
use crate::schema::flag::Flag;

/// Which evolution rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionRule {
    FriendsToCrush,
    RivalsToBetrayed,
    AcquaintancesToFriends,
    RejectionSpiral,
    SpontaneousCrush,
}

impl EvolutionRule {
    /// Every rule, in evaluation order.
    pub const ALL: [EvolutionRule; 5] = [
        EvolutionRule::FriendsToCrush,
        EvolutionRule::RivalsToBetrayed,
        EvolutionRule::AcquaintancesToFriends,
        EvolutionRule::RejectionSpiral,
        EvolutionRule::SpontaneousCrush,
    ];

    /// The flag this rule adds to `a → b` when it fires.
    pub fn produces(&self) -> Flag {
        match self {
            EvolutionRule::FriendsToCrush | EvolutionRule::SpontaneousCrush => Flag::Crush,
            EvolutionRule::RivalsToBetrayed => Flag::Betrayed,
            EvolutionRule::AcquaintancesToFriends => Flag::Friends,
            EvolutionRule::RejectionSpiral => Flag::Rejected,
        }
    }
}

/// One fired rule and its log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub rule: EvolutionRule,
    pub line: String,
}

/// Evolve the directed relationship `a → b`.
///
/// Rules are evaluated in a fixed order and are not exclusive; every
/// rule that fires adds its flag and yields one transition. A rule only
/// draws from `rng` once its flag condition holds.
pub fn evolve<R: Rng + ?Sized>(
    registry: &mut CharacterRegistry,
    a: CharacterId,
    b: CharacterId,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Vec<Transition> {
    let mut transitions = Vec::new();
    let a_name = registry.name(a).to_string();
    let b_name = registry.name(b).to_string();

    if registry.has_relationship_flag(a, b, &Flag::Friends)
        && rng.gen::<f64>() < config.friends_to_crush
    {
        registry.set_relationship_flag(a, b, Flag::Crush);
        transitions.push(Transition {
            rule: EvolutionRule::FriendsToCrush,
            line: format!("{} has started catching feelings for {}.", a_name, b_name),
        });
    }

    if registry.has_relationship_flag(a, b, &Flag::Rivals)
        && rng.gen::<f64>() < config.rivals_to_betrayed
    {
        registry.set_relationship_flag(a, b, Flag::Betrayed);
        transitions.push(Transition {
            rule: EvolutionRule::RivalsToBetrayed,
            line: format!("{} feels betrayed by {}.", a_name, b_name),
        });
    }

    if registry.has_relationship_flag(a, b, &Flag::Acquaintances)
        && !registry.has_relationship_flag(a, b, &Flag::Friends)
        && rng.gen::<f64>() < config.acquaintances_to_friends
    {
        registry.set_relationship_flag(a, b, Flag::Friends);
        transitions.push(Transition {
            rule: EvolutionRule::AcquaintancesToFriends,
            line: format!("{} now counts {} as a friend.", a_name, b_name),
        });
    }

    // Reads b's `rejected` flag toward a, not a's toward b.
    if registry.has_relationship_flag(a, b, &Flag::Crush)
        && registry.has_relationship_flag(b, a, &Flag::Rejected)
        && rng.gen::<f64>() < config.rejection_spiral
    {
        registry.set_relationship_flag(a, b, Flag::Rejected);
        registry.adjust_popularity(a, config.rejection_penalty.saturating_neg());
        transitions.push(Transition {
            rule: EvolutionRule::RejectionSpiral,
            line: format!(
                "{} is spiralling over {} and lost {} popularity.",
                a_name, b_name, config.rejection_penalty
            ),
        });
    }

    if rng.gen::<f64>() < config.spontaneous_crush {
        registry.set_relationship_flag(a, b, Flag::Crush);
        transitions.push(Transition {
            rule: EvolutionRule::SpontaneousCrush,
            line: format!("Out of nowhere, {} has a crush on {}!", a_name, b_name),
        });
    }

    for transition in &transitions {
        tracing::debug!(rule = ?transition.rule, "{}", transition.line);
    }
    transitions
}
