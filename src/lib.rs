//! Drama Engine: a turn-based reality-show simulator.
//!
//! A small cast shares a house. Each round two contestants are drawn,
//! a quality roll decides how dramatic things may get, and an event from
//! a data-driven catalog plays out: popularity shifts, relationship flags
//! accumulate, and relationships drift on their own. When the season ends
//! the least popular contestant is eliminated.

pub mod core;
pub mod schema;

pub use crate::core::catalog::{EventCatalog, EventDefinition};
pub use crate::core::config::SeasonConfig;
pub use crate::core::driver::{Advance, DriverState, RoundDriver, RoundReport, SimulationError};
pub use crate::core::registry::CharacterRegistry;
pub use crate::core::render::{Renderer, Transcript};
