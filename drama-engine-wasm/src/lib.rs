//! WASM bindings for drama-engine: powers the browser season viewer.

use wasm_bindgen::prelude::*;

use drama_engine::core::config::SeasonConfig;
use drama_engine::core::driver::{Advance, RoundDriver};
use drama_engine::core::registry::PopularityEntry;
use drama_engine::core::render::Renderer;

// ---------------------------------------------------------------------------
// Renderer that buffers output until the page asks for it
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
enum FeedLine {
    Dialogue(String),
    Relationship(String),
}

#[derive(Default)]
struct Feed {
    lines: Vec<FeedLine>,
}

impl Renderer for Feed {
    fn display_dialogue(&mut self, text: &str) {
        self.lines.push(FeedLine::Dialogue(text.to_string()));
    }

    // Standings are pulled through `DramaShow::standings` instead.
    fn display_popularity_snapshot(&mut self, _entries: &[PopularityEntry]) {}

    fn append_relationship_log(&mut self, line: &str) {
        self.lines.push(FeedLine::Relationship(line.to_string()));
    }
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct AdvanceOutput {
    advance: Advance,
    feed: Vec<FeedLine>,
    complete: bool,
}

#[derive(serde::Serialize)]
struct CastInfo {
    name: String,
    personality: String,
}

// ---------------------------------------------------------------------------
// DramaShow: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct DramaShow {
    driver: RoundDriver<Feed>,
}

#[wasm_bindgen]
impl DramaShow {
    /// Start a Reality House season with the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<DramaShow, JsError> {
        Self::with_rounds(seed, SeasonConfig::default().total_rounds)
    }

    /// Start a season with a custom length.
    pub fn with_rounds(seed: u64, rounds: u32) -> Result<DramaShow, JsError> {
        let driver = RoundDriver::builder()
            .reality_house()
            .map_err(|e| JsError::new(&format!("Data load error: {e}")))?
            .seed(seed)
            .total_rounds(rounds)
            .build(Feed::default())
            .map_err(|e| JsError::new(&format!("Season build error: {e}")))?;
        Ok(DramaShow { driver })
    }

    /// Play the next round (or the elimination) and return it as JSON.
    ///
    /// Shape: `{ "advance": {...}, "feed": [{ "kind": "dialogue", "text": ".." }], "complete": bool }`
    pub fn advance(&mut self) -> Result<String, JsError> {
        let advance = self
            .driver
            .advance()
            .map_err(|e| JsError::new(&format!("Round error: {e}")))?;
        let feed = std::mem::take(&mut self.driver.renderer_mut().lines);
        let output = AdvanceOutput {
            advance,
            feed,
            complete: self.driver.is_complete(),
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Current popularity board as a JSON array, in cast order.
    pub fn standings(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.driver.registry().popularity_snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// The cast as a JSON array of `{ name, personality }`.
    pub fn cast(&self) -> Result<String, JsError> {
        let cast: Vec<CastInfo> = self
            .driver
            .registry()
            .iter()
            .map(|c| CastInfo {
                name: c.name.clone(),
                personality: c.personality.to_string(),
            })
            .collect();
        serde_json::to_string(&cast)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Every relationship log line so far as a JSON array.
    pub fn relationship_log(&self) -> String {
        serde_json::to_string(self.driver.relationship_log()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn round(&self) -> u32 {
        self.driver.rounds_played()
    }

    pub fn total_rounds(&self) -> u32 {
        self.driver.total_rounds()
    }

    pub fn is_complete(&self) -> bool {
        self.driver.is_complete()
    }

    /// Restart from round one with a new seed, keeping the season length.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let fresh = DramaShow::with_rounds(seed, self.driver.total_rounds())?;
        self.driver = fresh.driver;
        Ok(())
    }
}
