//! The MML symbol set: the glyphs the encoder concatenates into output.
//!
//! The encoder treats every glyph as opaque text, so an alternative MML
//! dialect (different tie character, different sharp spelling) only needs
//! a different `MmlSymbols` value. The types derive serde so dialects can
//! be loaded from JSON configuration.

use serde::{Deserialize, Serialize};

/// Glyphs for one MML dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmlSymbols {
    /// Tie glyph joining two note tokens into one duration (e.g. `"^"`)
    pub tie: String,
    /// Prefix glyph for tick-notation lengths (e.g. `"="` in `c=48`)
    pub ticks: String,
    /// Rest glyph substituted for the note placeholder (e.g. `"r"`)
    pub rest: String,
    /// Chromatic note names from C upward, twelve entries
    pub note_names: Vec<String>,
}

/// Default chromatic spelling, sharps written with `+`.
const DEFAULT_NOTE_NAMES: [&str; 12] = [
    "c", "c+", "d", "d+", "e", "f", "f+", "g", "g+", "a", "a+", "b",
];

impl Default for MmlSymbols {
    fn default() -> Self {
        Self {
            tie: "^".to_string(),
            ticks: "=".to_string(),
            rest: "r".to_string(),
            note_names: DEFAULT_NOTE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MmlSymbols {
    /// Chromatic name for a MIDI note number (octave is not included —
    /// octave tracking belongs to the surrounding track writer).
    pub fn note_name(&self, midi_note: u8) -> &str {
        &self.note_names[midi_note as usize % self.note_names.len()]
    }
}
