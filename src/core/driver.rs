/// The round driver: pair → quality roll → filter → select → apply + evolve → render.
///
/// Owns all mutable state of a season and advances one round per
/// `advance()` call. Collaborators are injected through the builder.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::catalog::{CatalogError, EventCatalog, EventDefinition};
use crate::core::config::{self, ConfigError, SeasonConfig};
use crate::core::effect::{apply_event, EffectReport};
use crate::core::eligibility;
use crate::core::evolution::{evolve, Transition};
use crate::core::registry::{CharacterRegistry, PopularityEntry, RegistryError};
use crate::core::render::Renderer;
use crate::core::selector::{EventSelector, Pair, UniformSelector};
use crate::schema::character::{CastMember, CharacterId, Personality};
use crate::schema::event::RoundQuality;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("a season needs at least 2 contestants, got {0}")]
    TooFewCharacters(usize),
    #[error("event catalog is empty")]
    EmptyCatalog,
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Where the driver is in the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Idle,
    RoundInProgress,
    RoundComplete,
    SimulationComplete,
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,
    pub a: String,
    pub b: String,
    pub quality: RoundQuality,
    /// Ids of the eligible events, in catalog order.
    pub eligible: Vec<String>,
    /// The event that ran, or `None` for a quiet round.
    pub event: Option<String>,
    pub text: String,
    pub effect: EffectReport,
    pub transitions: Vec<Transition>,
    pub standings: Vec<PopularityEntry>,
}

/// The end-of-season result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub name: String,
    pub personality: Personality,
    pub popularity: i32,
    pub message: String,
}

/// The result of one `advance()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    Round(RoundReport),
    Eliminated(Elimination),
    /// The season is over; nothing happened.
    Finished,
}

/// Drives a season one round at a time. Built via `RoundDriver::builder()`.
pub struct RoundDriver<R: Renderer> {
    registry: CharacterRegistry,
    catalog: EventCatalog,
    selector: Box<dyn EventSelector>,
    renderer: R,
    config: SeasonConfig,
    rng: StdRng,
    rounds_played: u32,
    state: DriverState,
    relationship_log: Vec<String>,
}

/// Builder for constructing a `RoundDriver`.
///
/// The renderer type is inferred from the value handed to `build`.
pub struct RoundDriverBuilder<R: Renderer> {
    cast_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    /// Directly provided cast (for testing without files).
    cast: Option<Vec<CastMember>>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<EventCatalog>,
    /// Directly provided config (for testing without files).
    config: Option<SeasonConfig>,
    seed: Option<u64>,
    total_rounds: Option<u32>,
    selector: Option<Box<dyn EventSelector>>,
    renderer: PhantomData<fn() -> R>,
}

impl<R: Renderer> RoundDriver<R> {
    pub fn builder() -> RoundDriverBuilder<R> {
        RoundDriverBuilder::new()
    }

    /// The advance trigger.
    ///
    /// Plays the next round while rounds remain. The call after the last
    /// round announces the elimination; every call after that is a no-op.
    pub fn advance(&mut self) -> Result<Advance, SimulationError> {
        match self.state {
            DriverState::SimulationComplete => Ok(Advance::Finished),
            _ if self.rounds_played >= self.config.total_rounds => {
                Ok(Advance::Eliminated(self.finish()))
            }
            _ => {
                self.state = DriverState::RoundInProgress;
                let report = self.play_round()?;
                self.rounds_played += 1;
                self.state = DriverState::RoundComplete;
                Ok(Advance::Round(report))
            }
        }
    }

    /// Advance until the season is over, collecting every result.
    pub fn run_to_completion(&mut self) -> Result<Vec<Advance>, SimulationError> {
        let mut results = Vec::new();
        while !self.is_complete() {
            results.push(self.advance()?);
        }
        Ok(results)
    }

    fn play_round(&mut self) -> Result<RoundReport, SimulationError> {
        let round = self.rounds_played + 1;
        let (a, b) = self.registry.pick_distinct_pair(&mut self.rng)?;
        let quality = self.config.tier_roll.sample(&mut self.rng);

        let eligible = eligibility::filter(&self.catalog, &self.registry, a, b, quality);
        let eligible_ids: Vec<String> = eligible.iter().map(|e| e.id.clone()).collect();
        let selected: Option<&EventDefinition> = match (self.registry.get(a), self.registry.get(b)) {
            (Some(char_a), Some(char_b)) => self.selector.select(
                &eligible,
                Pair {
                    a: char_a,
                    b: char_b,
                },
                &mut self.rng,
            ),
            _ => None,
        };

        let a_name = self.registry.name(a).to_string();
        let b_name = self.registry.name(b).to_string();
        tracing::debug!(
            round,
            quality = %quality,
            eligible = eligible_ids.len(),
            "{} and {} drawn",
            a_name,
            b_name
        );

        let (event_id, text, effect, transitions) = match selected {
            Some(event) => {
                let text = event.describe(&a_name, &b_name);
                let effect = apply_event(&mut self.registry, event, a, b);
                let transitions =
                    evolve(&mut self.registry, a, b, &self.config.evolution, &mut self.rng);
                (Some(event.id.clone()), text, effect, transitions)
            }
            None => {
                tracing::debug!(round, "no eligible event");
                (
                    None,
                    format!("{} and {} kept things civil. No drama this round.", a_name, b_name),
                    EffectReport::default(),
                    Vec::new(),
                )
            }
        };

        let standings = self.registry.popularity_snapshot();

        self.renderer.display_dialogue(&text);
        for transition in &transitions {
            self.relationship_log.push(transition.line.clone());
            self.renderer.append_relationship_log(&transition.line);
        }
        self.renderer.display_popularity_snapshot(&standings);

        Ok(RoundReport {
            round,
            a: a_name,
            b: b_name,
            quality,
            eligible: eligible_ids,
            event: event_id,
            text,
            effect,
            transitions,
            standings,
        })
    }

    fn finish(&mut self) -> Elimination {
        self.state = DriverState::SimulationComplete;
        // The builder guarantees a non-empty cast.
        let loser = self.registry.lowest_popularity().unwrap_or(CharacterId(0));
        let name = self.registry.name(loser).to_string();
        let popularity = self.registry.popularity(loser);
        let personality = self
            .registry
            .get(loser)
            .map_or(Personality::Wildcard, |c| c.personality);
        let message = format!(
            "{} has been eliminated from the house with {} popularity.",
            name, popularity
        );
        tracing::info!(rounds = self.rounds_played, "{}", message);

        self.renderer.display_dialogue(&message);
        self.renderer
            .display_popularity_snapshot(&self.registry.popularity_snapshot());

        Elimination {
            name,
            personality,
            popularity,
            message,
        }
    }

    /// Events eligible for the named pair at `quality`, without touching state.
    pub fn preview_eligible(
        &self,
        a: CharacterId,
        b: CharacterId,
        quality: RoundQuality,
    ) -> Vec<&EventDefinition> {
        eligibility::filter(&self.catalog, &self.registry, a, b, quality)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == DriverState::SimulationComplete
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Every relationship log line so far, oldest first.
    pub fn relationship_log(&self) -> &[String] {
        &self.relationship_log
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> Default for RoundDriverBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> RoundDriverBuilder<R> {
    pub fn new() -> Self {
        RoundDriverBuilder {
            cast_path: None,
            catalog_path: None,
            config_path: None,
            cast: None,
            catalog: None,
            config: None,
            seed: None,
            total_rounds: None,
            selector: None,
            renderer: PhantomData,
        }
    }

    pub fn cast_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cast_path = Some(path.into());
        self
    }

    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Provide the cast directly (for testing without files).
    pub fn with_cast(mut self, cast: Vec<CastMember>) -> Self {
        self.cast = Some(cast);
        self
    }

    /// Provide the catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Provide the season config directly (for testing without files).
    pub fn with_config(mut self, config: SeasonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use the embedded Reality House cast and catalog.
    pub fn reality_house(mut self) -> Result<Self, SimulationError> {
        self.cast = Some(config::reality_house_cast()?);
        self.catalog = Some(EventCatalog::reality_house()?);
        Ok(self)
    }

    /// Overrides the config's seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the config's round count.
    pub fn total_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = Some(rounds);
        self
    }

    pub fn selector(mut self, selector: impl EventSelector + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn build(self, renderer: R) -> Result<RoundDriver<R>, SimulationError> {
        let cast = match self.cast_path {
            Some(ref path) => config::load_cast(path)?,
            None => self.cast.unwrap_or_default(),
        };
        let catalog = match self.catalog_path {
            Some(ref path) => EventCatalog::load_from_ron(path)?,
            None => self.catalog.unwrap_or_default(),
        };
        let mut config = match self.config_path {
            Some(ref path) => SeasonConfig::load_from_ron(path)?,
            None => self.config.unwrap_or_default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rounds) = self.total_rounds {
            config.total_rounds = rounds;
        }
        config.validate()?;

        if cast.len() < 2 {
            return Err(SimulationError::TooFewCharacters(cast.len()));
        }
        if catalog.is_empty() {
            return Err(SimulationError::EmptyCatalog);
        }
        let registry = CharacterRegistry::from_cast(&cast)?;

        tracing::info!(
            contestants = registry.len(),
            events = catalog.len(),
            rounds = config.total_rounds,
            seed = config.seed,
            "season ready"
        );

        Ok(RoundDriver {
            registry,
            catalog,
            selector: self
                .selector
                .unwrap_or_else(|| Box::new(UniformSelector)),
            renderer,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            rounds_played: 0,
            state: DriverState::Idle,
            relationship_log: Vec::new(),
        })
    }
}
