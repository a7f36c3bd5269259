/// Eligibility filter: which catalog events fit a pair in a round of a given quality.

use crate::core::catalog::{EventCatalog, EventDefinition};
use crate::core::registry::CharacterRegistry;
use crate::schema::character::CharacterId;
use crate::schema::event::RoundQuality;

/// Whether a single event may fire for `(a, b)` in a round of `quality`.
///
/// Each required flag must be held in at least one direction; no
/// blocking flag may be held in either.
pub fn is_eligible(
    event: &EventDefinition,
    registry: &CharacterRegistry,
    a: CharacterId,
    b: CharacterId,
    quality: RoundQuality,
) -> bool {
    if !quality.admits(event.tier) {
        return false;
    }
    let requirements_met = event
        .requires
        .iter()
        .all(|flag| registry.either_has_flag(a, b, flag));
    let blocked = event
        .blocked_by
        .iter()
        .any(|flag| registry.either_has_flag(a, b, flag));
    requirements_met && !blocked
}

/// All events eligible for the pair, in catalog order.
pub fn filter<'c>(
    catalog: &'c EventCatalog,
    registry: &CharacterRegistry,
    a: CharacterId,
    b: CharacterId,
    quality: RoundQuality,
) -> Vec<&'c EventDefinition> {
    catalog
        .iter()
        .filter(|event| is_eligible(event, registry, a, b, quality))
        .collect()
}
