/// Event catalog: definitions, RON loading, and the built-in reality house set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::character::Personality;
use crate::schema::event::{EffectOp, Tier};
use crate::schema::flag::Flag;

/// The catalog shipped with the crate.
pub const REALITY_HOUSE_CATALOG: &str = include_str!("../../data/reality_house/catalog.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate event id: {0}")]
    DuplicateId(String),
    #[error("event '{id}': {source}")]
    Template {
        id: String,
        #[source]
        source: TemplateError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A scripted drama event.
///
/// `preferred_a` / `preferred_b` describe who the event was written for.
/// Eligibility never looks at them; only an opt-in selector does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    pub tier: Tier,
    pub requires: Vec<Flag>,
    pub blocked_by: Vec<Flag>,
    pub preferred_a: Vec<Personality>,
    pub preferred_b: Vec<Personality>,
    pub template: Template,
    pub effect: Vec<EffectOp>,
}

impl EventDefinition {
    /// Render the event's description for participants `a` and `b`.
    pub fn describe(&self, a: &str, b: &str) -> String {
        self.template.render(a, b)
    }
}

/// The fixed set of events for a session, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
    index: FxHashMap<String, usize>,
}

// RON files carry the template as plain text, so they go through an
// intermediate shape before becoming `EventDefinition`s.

#[derive(Debug, Deserialize)]
#[serde(rename = "Event")]
struct RonEvent {
    id: String,
    tier: Tier,
    #[serde(default)]
    requires: Vec<Flag>,
    #[serde(default)]
    blocked_by: Vec<Flag>,
    #[serde(default)]
    preferred_a: Vec<Personality>,
    #[serde(default)]
    preferred_b: Vec<Personality>,
    template: String,
    #[serde(default)]
    effect: Vec<EffectOp>,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reality house catalog embedded in the crate.
    pub fn reality_house() -> Result<EventCatalog, CatalogError> {
        Self::parse_ron(REALITY_HOUSE_CATALOG)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<EventCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON list of `Event(...)` entries.
    pub fn parse_ron(input: &str) -> Result<EventCatalog, CatalogError> {
        let raw: Vec<RonEvent> = ron::from_str(input)?;
        let mut catalog = EventCatalog::new();

        for ron_event in raw {
            let template =
                Template::parse(&ron_event.template).map_err(|source| CatalogError::Template {
                    id: ron_event.id.clone(),
                    source,
                })?;
            catalog.insert(EventDefinition {
                id: ron_event.id,
                tier: ron_event.tier,
                requires: ron_event.requires,
                blocked_by: ron_event.blocked_by,
                preferred_a: ron_event.preferred_a,
                preferred_b: ron_event.preferred_b,
                template,
                effect: ron_event.effect,
            })?;
        }

        Ok(catalog)
    }

    /// Append an event. Ids must be unique.
    pub fn insert(&mut self, event: EventDefinition) -> Result<(), CatalogError> {
        if self.index.contains_key(&event.id) {
            return Err(CatalogError::DuplicateId(event.id));
        }
        self.index.insert(event.id.clone(), self.events.len());
        self.events.push(event);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.index.get(id).map(|&i| &self.events[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
