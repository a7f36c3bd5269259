/// Event display templates: parsing and rendering of `{0}` / `{1}` slots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::event::Participant;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A participant's name: `{0}` for A, `{1}` for B.
    Name(Participant),
}

/// A parsed event template with two positional name slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{0}` → first participant's name
    /// - `{1}` → second participant's name
    /// - `{{` / `}}` → literal braces
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }
                if end >= len {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let content: String = chars[start..end].iter().collect();
                segments.push(Self::parse_slot(content.trim())?);
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    fn parse_slot(content: &str) -> Result<TemplateSegment, TemplateError> {
        match content {
            "0" => Ok(TemplateSegment::Name(Participant::A)),
            "1" => Ok(TemplateSegment::Name(Participant::B)),
            "" => Err(TemplateError::Parse("empty braces".to_string())),
            other => Err(TemplateError::Parse(format!(
                "unknown slot '{{{}}}': only {{0}} and {{1}} are supported",
                other
            ))),
        }
    }

    /// Substitute the two participant names.
    pub fn render(&self, a: &str, b: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Name(Participant::A) => out.push_str(a),
                TemplateSegment::Name(Participant::B) => out.push_str(b),
            }
        }
        out
    }

    /// Whether the template mentions `participant` at least once.
    pub fn mentions(&self, participant: Participant) -> bool {
        self.segments
            .iter()
            .any(|s| *s == TemplateSegment::Name(participant))
    }
}
