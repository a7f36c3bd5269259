/// Effect applicator: runs an event's outcome against the two participants.

use serde::{Deserialize, Serialize};

use crate::core::catalog::EventDefinition;
use crate::core::registry::CharacterRegistry;
use crate::schema::character::CharacterId;
use crate::schema::event::{EffectOp, Participant};
use crate::schema::flag::Flag;

/// A flag that an effect or evolution rule newly added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagChange {
    pub from: String,
    pub to: String,
    pub flag: Flag,
}

/// What an applied event changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub popularity_delta_a: i32,
    pub popularity_delta_b: i32,
    pub flags_added: Vec<FlagChange>,
}

impl EffectOp {
    /// Apply this step with `a` and `b` bound to the participants.
    pub fn apply(
        &self,
        registry: &mut CharacterRegistry,
        a: CharacterId,
        b: CharacterId,
        report: &mut EffectReport,
    ) {
        let resolve = |p: Participant| match p {
            Participant::A => a,
            Participant::B => b,
        };
        match self {
            EffectOp::Popularity { target, delta } => {
                registry.adjust_popularity(resolve(*target), *delta);
                match target {
                    Participant::A => {
                        report.popularity_delta_a = report.popularity_delta_a.saturating_add(*delta)
                    }
                    Participant::B => {
                        report.popularity_delta_b = report.popularity_delta_b.saturating_add(*delta)
                    }
                }
            }
            EffectOp::AddFlag { holder, flag } => {
                let from = resolve(*holder);
                let to = resolve(holder.other());
                if registry.set_relationship_flag(from, to, flag.clone()) {
                    report.flags_added.push(FlagChange {
                        from: registry.name(from).to_string(),
                        to: registry.name(to).to_string(),
                        flag: flag.clone(),
                    });
                }
            }
        }
    }
}

/// Run `event`'s effect with `a` as the first participant and `b` as the second.
pub fn apply_event(
    registry: &mut CharacterRegistry,
    event: &EventDefinition,
    a: CharacterId,
    b: CharacterId,
) -> EffectReport {
    let mut report = EffectReport::default();
    for op in &event.effect {
        op.apply(registry, a, b, &mut report);
    }
    tracing::debug!(
        "applied '{}' to {} ({:+}) and {} ({:+})",
        event.id,
        registry.name(a),
        report.popularity_delta_a,
        registry.name(b),
        report.popularity_delta_b
    );
    report
}
