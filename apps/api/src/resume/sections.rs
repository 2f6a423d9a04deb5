//! Splits generated resume text into named sections.
//!
//! A trimmed, non-blank line is a header when it ends with `:` or is entirely
//! upper-case. Every other line belongs to the most recent header. Content
//! before the first header, or after a header with an empty name, is dropped.
//!
//! The heuristic is loose: an all-caps content line (e.g. an acronym on its
//! own) opens a new section.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Ordered map of upper-cased section name → content lines.
///
/// Sections keep first-seen order. A repeated header replaces the earlier
/// section's content but not its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResumeSections {
    sections: IndexMap<String, Vec<String>>,
}

impl ResumeSections {
    /// Content lines for `name`, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sections
            .get(&normalize_name(name))
            .map(|lines| lines.as_slice())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }

    fn insert(&mut self, name: String, lines: Vec<String>) {
        if let Some(previous) = self.sections.insert(name.clone(), lines) {
            debug!(
                section = %name,
                dropped_lines = previous.len(),
                "Duplicate section header, keeping the later content"
            );
        }
    }
}

/// Parses resume text into sections. Never fails; degenerate input yields an
/// empty map.
pub fn parse_sections(text: &str) -> ResumeSections {
    let mut result = ResumeSections::default();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_header(line) {
            if let Some((name, lines)) = current.take() {
                result.insert(name, lines);
            }
            // A bare `:` names nothing; its lines are dropped like preamble.
            let name = normalize_name(line);
            if !name.is_empty() {
                current = Some((name, Vec::new()));
            }
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        }
    }

    if let Some((name, lines)) = current {
        result.insert(name, lines);
    }

    result
}

/// A header ends with a colon or has cased characters that are all upper-case.
pub fn is_header(line: &str) -> bool {
    line.ends_with(':') || is_upper(line)
}

/// True if the string has at least one cased character and none are lower-case.
fn is_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn normalize_name(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim_end().to_uppercase()
}
