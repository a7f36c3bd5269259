/// Render collaborator: the narrow surface the driver talks to.

use crate::core::registry::PopularityEntry;

/// Whatever puts the show on screen.
pub trait Renderer {
    fn display_dialogue(&mut self, text: &str);
    fn display_popularity_snapshot(&mut self, entries: &[PopularityEntry]);
    fn append_relationship_log(&mut self, line: &str);
}

/// A renderer that keeps everything it was handed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub dialogue: Vec<String>,
    pub relationship_log: Vec<String>,
    pub snapshots: Vec<Vec<PopularityEntry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_dialogue(&self) -> Option<&str> {
        self.dialogue.last().map(String::as_str)
    }

    pub fn last_snapshot(&self) -> Option<&[PopularityEntry]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}

impl Renderer for Transcript {
    fn display_dialogue(&mut self, text: &str) {
        self.dialogue.push(text.to_string());
    }

    fn display_popularity_snapshot(&mut self, entries: &[PopularityEntry]) {
        self.snapshots.push(entries.to_vec());
    }

    fn append_relationship_log(&mut self, line: &str) {
        self.relationship_log.push(line.to_string());
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn display_dialogue(&mut self, text: &str) {
        (**self).display_dialogue(text);
    }

    fn display_popularity_snapshot(&mut self, entries: &[PopularityEntry]) {
        (**self).display_popularity_snapshot(entries);
    }

    fn append_relationship_log(&mut self, line: &str) {
        (**self).append_relationship_log(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::character::Personality;

    #[test]
    fn transcript_records_in_order() {
        let mut transcript = Transcript::new();
        transcript.display_dialogue("first");
        transcript.display_dialogue("second");
        transcript.append_relationship_log("Tasha now counts Liam as a friend.");
        transcript.display_popularity_snapshot(&[PopularityEntry {
            name: "Tasha".to_string(),
            personality: Personality::Hothead,
            popularity: 50,
        }]);

        assert_eq!(transcript.dialogue, vec!["first", "second"]);
        assert_eq!(transcript.last_dialogue(), Some("second"));
        assert_eq!(transcript.relationship_log.len(), 1);
        assert_eq!(transcript.last_snapshot().unwrap()[0].popularity, 50);
    }

    #[test]
    fn borrowed_renderer_forwards() {
        fn announce<R: Renderer>(mut renderer: R) {
            renderer.display_dialogue("through a reference");
        }

        let mut transcript = Transcript::new();
        announce(&mut transcript);
        assert_eq!(transcript.last_dialogue(), Some("through a reference"));
    }
}
