/// Season configuration: tier cut points, evolution odds, round count.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::character::CastMember;
use crate::schema::event::RoundQuality;

/// The cast shipped with the crate.
pub const REALITY_HOUSE_CAST: &str = include_str!("../../data/reality_house/cast.ron");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tier cut points must satisfy pass_at <= excellent_at <= 100 (got {pass_at}/{excellent_at})")]
    InvalidTierCuts { pass_at: u32, excellent_at: u32 },
    #[error("probability '{name}' must be within 0.0..=1.0 (got {value})")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("rejection_penalty must not be negative (got {0})")]
    NegativePenalty(i32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Cut points on a uniform 0..100 roll.
///
/// Below `pass_at` the round fails, below `excellent_at` it passes,
/// anything else is excellent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierRoll {
    pub pass_at: u32,
    pub excellent_at: u32,
}

impl Default for TierRoll {
    fn default() -> Self {
        Self {
            pass_at: 40,
            excellent_at: 70,
        }
    }
}

impl TierRoll {
    /// Map a roll in 0..100 onto a quality band.
    pub fn classify(&self, roll: u32) -> RoundQuality {
        if roll < self.pass_at {
            RoundQuality::Fail
        } else if roll < self.excellent_at {
            RoundQuality::Pass
        } else {
            RoundQuality::Excellent
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundQuality {
        self.classify(rng.gen_range(0..100))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pass_at > self.excellent_at || self.excellent_at > 100 {
            return Err(ConfigError::InvalidTierCuts {
                pass_at: self.pass_at,
                excellent_at: self.excellent_at,
            });
        }
        Ok(())
    }
}

/// Odds for each relationship evolution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub friends_to_crush: f64,
    pub rivals_to_betrayed: f64,
    pub acquaintances_to_friends: f64,
    pub rejection_spiral: f64,
    pub spontaneous_crush: f64,
    /// Popularity lost by whoever spirals after a rejection.
    pub rejection_penalty: i32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            friends_to_crush: 0.30,
            rivals_to_betrayed: 0.20,
            acquaintances_to_friends: 0.25,
            rejection_spiral: 0.20,
            spontaneous_crush: 0.05,
            rejection_penalty: 3,
        }
    }
}

impl EvolutionConfig {
    /// Every rule fires whenever its flags line up. Handy for tests.
    pub fn always() -> Self {
        Self::with_probability(1.0)
    }

    /// No rule ever fires.
    pub fn never() -> Self {
        Self::with_probability(0.0)
    }

    fn with_probability(p: f64) -> Self {
        Self {
            friends_to_crush: p,
            rivals_to_betrayed: p,
            acquaintances_to_friends: p,
            rejection_spiral: p,
            spontaneous_crush: p,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let odds = [
            ("friends_to_crush", self.friends_to_crush),
            ("rivals_to_betrayed", self.rivals_to_betrayed),
            ("acquaintances_to_friends", self.acquaintances_to_friends),
            ("rejection_spiral", self.rejection_spiral),
            ("spontaneous_crush", self.spontaneous_crush),
        ];
        for (name, value) in odds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        if self.rejection_penalty < 0 {
            return Err(ConfigError::NegativePenalty(self.rejection_penalty));
        }
        Ok(())
    }
}

/// Everything a season needs besides its cast and catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    pub total_rounds: u32,
    pub seed: u64,
    pub tier_roll: TierRoll,
    pub evolution: EvolutionConfig,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            total_rounds: 10,
            seed: 0,
            tier_roll: TierRoll::default(),
            evolution: EvolutionConfig::default(),
        }
    }
}

impl SeasonConfig {
    pub fn load_from_ron(path: &Path) -> Result<SeasonConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<SeasonConfig, ConfigError> {
        let config: SeasonConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tier_roll.validate()?;
        self.evolution.validate()
    }
}

/// Load a cast roster from a RON list of `(name: .., personality: ..)`.
pub fn load_cast(path: &Path) -> Result<Vec<CastMember>, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_cast(&contents)
}

pub fn parse_cast(input: &str) -> Result<Vec<CastMember>, ConfigError> {
    Ok(ron::from_str(input)?)
}

/// Tasha, Liam and Zoe.
pub fn reality_house_cast() -> Result<Vec<CastMember>, ConfigError> {
    parse_cast(REALITY_HOUSE_CAST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::character::Personality;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn classify_uses_cut_points() {
        let roll = TierRoll::default();
        assert_eq!(roll.classify(0), RoundQuality::Fail);
        assert_eq!(roll.classify(39), RoundQuality::Fail);
        assert_eq!(roll.classify(40), RoundQuality::Pass);
        assert_eq!(roll.classify(69), RoundQuality::Pass);
        assert_eq!(roll.classify(70), RoundQuality::Excellent);
        assert_eq!(roll.classify(99), RoundQuality::Excellent);
    }

    #[test]
    fn sample_hits_every_band() {
        let roll = TierRoll::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            match roll.sample(&mut rng) {
                RoundQuality::Fail => seen[0] = true,
                RoundQuality::Pass => seen[1] = true,
                RoundQuality::Excellent => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn degenerate_cuts_are_allowed() {
        let always_excellent = TierRoll {
            pass_at: 0,
            excellent_at: 0,
        };
        assert!(always_excellent.validate().is_ok());
        assert_eq!(always_excellent.classify(0), RoundQuality::Excellent);

        let always_fail = TierRoll {
            pass_at: 100,
            excellent_at: 100,
        };
        assert!(always_fail.validate().is_ok());
        assert_eq!(always_fail.classify(99), RoundQuality::Fail);
    }

    #[test]
    fn inverted_cuts_rejected() {
        let bad = TierRoll {
            pass_at: 80,
            excellent_at: 20,
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidTierCuts { .. })
        ));
        let too_high = TierRoll {
            pass_at: 10,
            excellent_at: 120,
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let config = EvolutionConfig {
            spontaneous_crush: 1.5,
            ..EvolutionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "spontaneous_crush", .. })
        ));
    }

    #[test]
    fn season_defaults_fill_missing_fields() {
        let config = SeasonConfig::parse_ron("(total_rounds: 4)").unwrap();
        assert_eq!(config.total_rounds, 4);
        assert_eq!(config.tier_roll, TierRoll::default());
        assert_eq!(config.evolution, EvolutionConfig::default());

        let partial = SeasonConfig::parse_ron("(tier_roll: (excellent_at: 90))").unwrap();
        assert_eq!(partial.tier_roll.pass_at, 40);
        assert_eq!(partial.tier_roll.excellent_at, 90);
        assert_eq!(partial.total_rounds, 10);
    }

    #[test]
    fn season_parse_validates() {
        assert!(SeasonConfig::parse_ron("(tier_roll: (pass_at: 90, excellent_at: 10))").is_err());
    }

    #[test]
    fn negative_penalty_rejected() {
        let result = SeasonConfig::parse_ron("(evolution: (rejection_penalty: -5))");
        assert!(matches!(result, Err(ConfigError::NegativePenalty(-5))));
        let extreme = EvolutionConfig {
            rejection_penalty: i32::MIN,
            ..EvolutionConfig::default()
        };
        assert!(extreme.validate().is_err());
        assert!(SeasonConfig::parse_ron("(evolution: (rejection_penalty: 0))").is_ok());
    }

    #[test]
    fn embedded_cast_loads() {
        let cast = reality_house_cast().unwrap();
        assert_eq!(
            cast,
            vec![
                CastMember::new("Tasha", Personality::Hothead),
                CastMember::new("Liam", Personality::Loyalist),
                CastMember::new("Zoe", Personality::Romantic),
            ]
        );
    }
}
