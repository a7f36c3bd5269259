use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed relationship tag one character holds toward another.
///
/// The well-known flags are the ones events and the evolution rules
/// read and write. `Custom` keeps the tag system open for catalogs
/// that invent their own. Data files write flags by their snake_case name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Flag {
    Crush,
    Friends,
    Rivals,
    Betrayed,
    Rejected,
    Acquaintances,
    GossipedAbout,
    Custom(String),
}

impl Flag {
    /// The snake_case name used in log lines and tool output.
    pub fn name(&self) -> &str {
        match self {
            Self::Crush => "crush",
            Self::Friends => "friends",
            Self::Rivals => "rivals",
            Self::Betrayed => "betrayed",
            Self::Rejected => "rejected",
            Self::Acquaintances => "acquaintances",
            Self::GossipedAbout => "gossiped_about",
            Self::Custom(name) => name,
        }
    }

    /// Parse a flag name. Unknown names become `Custom`.
    pub fn parse(name: &str) -> Flag {
        match name {
            "crush" => Self::Crush,
            "friends" => Self::Friends,
            "rivals" => Self::Rivals,
            "betrayed" => Self::Betrayed,
            "rejected" => Self::Rejected,
            "acquaintances" => Self::Acquaintances,
            "gossiped_about" => Self::GossipedAbout,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<String> for Flag {
    fn from(name: String) -> Self {
        Flag::parse(&name)
    }
}

impl From<Flag> for String {
    fn from(flag: Flag) -> Self {
        flag.name().to_string()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
