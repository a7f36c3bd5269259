use serde::{Deserialize, Serialize};
use std::fmt;

use super::flag::Flag;

/// Narrative weight of a drama event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Light,
    Major,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Major => "Major",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The coarse quality band rolled at the start of each round.
///
/// `Fail` admits no events, `Pass` admits only light ones and
/// `Excellent` admits everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundQuality {
    Fail,
    Pass,
    Excellent,
}

impl RoundQuality {
    /// Whether an event of `tier` may run in a round of this quality.
    pub fn admits(&self, tier: Tier) -> bool {
        match self {
            Self::Fail => false,
            Self::Pass => tier == Tier::Light,
            Self::Excellent => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::Pass => "Pass",
            Self::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for RoundQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two participants of an event, by draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// The first-drawn participant, `{0}` in templates.
    A,
    /// The second-drawn participant, `{1}` in templates.
    B,
}

impl Participant {
    pub fn other(&self) -> Participant {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A single step of an event's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOp {
    /// Shift a participant's popularity.
    Popularity { target: Participant, delta: i32 },
    /// `holder` gains `flag` toward the other participant.
    AddFlag { holder: Participant, flag: Flag },
}
