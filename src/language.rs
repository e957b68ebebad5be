//! Language profiles
//!
//! A profile bundles everything the engine needs to speak one language or
//! data format: the ordered syntax patterns with their colors, the
//! indentation start/end characters, and the completion pairs. Profiles can
//! be built in code or parsed from a TOML document, and applied to the
//! engine in one call.
//!
//! Pattern order in the profile is paint order, so a profile author
//! controls precedence the same way direct registration does: later
//! patterns win over earlier ones where they overlap.

use regex::Regex;
use toml::Table;
use toml::Value;

use crate::error::{EngineError, Result};
use crate::style::Color;

/// A named bundle of engine configuration
#[derive(Debug, Default)]
pub struct LanguageProfile {
    /// Profile name (e.g. "json")
    pub name: String,
    /// Ordered `(pattern source, color)` pairs
    pub patterns: Vec<(String, Color)>,
    /// Characters opening one indentation level
    pub indent_starts: Vec<char>,
    /// Characters closing one indentation level
    pub indent_ends: Vec<char>,
    /// Completion pairs
    pub pairs: Vec<(char, char)>,
}

impl LanguageProfile {
    /// Create an empty profile
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add a pattern; order of addition is paint order
    pub fn add_pattern(&mut self, pattern: &str, color: Color) -> Result<()> {
        Regex::new(pattern)?;
        self.patterns.push((pattern.to_string(), color));
        Ok(())
    }

    /// Add a completion pair
    pub fn add_pair(&mut self, open: char, close: char) {
        self.pairs.push((open, close));
    }

    /// Parse a profile from a TOML document
    ///
    /// ```toml
    /// name = "braces"
    /// indent-starts = ["{"]
    /// indent-ends = ["}"]
    ///
    /// [[patterns]]
    /// regex = '"[^"]*"'
    /// color = 0x00AA00
    ///
    /// [[pairs]]
    /// open = "{"
    /// close = "}"
    /// ```
    pub fn from_toml(document: &str) -> Result<Self> {
        let table: Table = document
            .parse()
            .map_err(|e: toml::de::Error| EngineError::Profile(e.to_string()))?;

        let name = match table.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(EngineError::Profile("name must be a string".into())),
            None => return Err(EngineError::Profile("missing name".into())),
        };

        let mut profile = Self::new(&name);
        profile.indent_starts = parse_char_list(&table, "indent-starts")?;
        profile.indent_ends = parse_char_list(&table, "indent-ends")?;

        if let Some(value) = table.get("patterns") {
            let entries = value
                .as_array()
                .ok_or_else(|| EngineError::Profile("patterns must be an array".into()))?;
            for entry in entries {
                let regex = entry
                    .get("regex")
                    .and_then(Value::as_str)
                    .ok_or_else(|| EngineError::Profile("pattern without a regex".into()))?;
                let color = entry
                    .get("color")
                    .and_then(Value::as_integer)
                    .ok_or_else(|| EngineError::Profile("pattern without a color".into()))?;
                profile.add_pattern(regex, Color(color as u32))?;
            }
        }

        if let Some(value) = table.get("pairs") {
            let entries = value
                .as_array()
                .ok_or_else(|| EngineError::Profile("pairs must be an array".into()))?;
            for entry in entries {
                let open = single_char(entry.get("open"), "pair open")?;
                let close = single_char(entry.get("close"), "pair close")?;
                profile.add_pair(open, close);
            }
        }

        Ok(profile)
    }
}

/// Read an optional array of single-character strings
fn parse_char_list(table: &Table, key: &str) -> Result<Vec<char>> {
    let value = match table.get(key) {
        Some(value) => value,
        None => return Ok(Vec::new()),
    };
    let entries = value
        .as_array()
        .ok_or_else(|| EngineError::Profile(format!("{key} must be an array")))?;
    entries
        .iter()
        .map(|entry| single_char(Some(entry), key))
        .collect()
}

/// Require a TOML value to be exactly one character
fn single_char(value: Option<&Value>, what: &str) -> Result<char> {
    let s = value
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::Profile(format!("{what} must be a string")))?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(EngineError::Profile(format!(
            "{what} must be a single character, got {s:?}"
        ))),
    }
}
