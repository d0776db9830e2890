//! Rendering of stored note text for a concrete pitch or rest.
//!
//! The encoder's tables store token text with the literal placeholder
//! `"$N"` where a note name goes (`"$N4."` is "a dotted quarter of
//! whichever pitch"). Downstream grammars that do their own pitch
//! assembly consume the placeholder form byte-for-byte; callers that
//! already know the pitch substitute it here.

use crate::symbols::MmlSymbols;

/// The pitch placeholder embedded in stored token text.
pub const NOTE_PLACEHOLDER: &str = "$N";

/// What to substitute for the placeholder of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A rest — the placeholder becomes the dialect's rest glyph.
    Rest,
    /// A pitched note, identified by MIDI note number.
    Note(u8),
}

/// Replace every placeholder in `raw` with the glyph for `key`.
///
/// Tied chains contain one placeholder per constituent token, and all of
/// them name the same pitch, so a single substitution pass covers the
/// whole chain.
pub fn render(raw: &str, symbols: &MmlSymbols, key: Key) -> String {
    let glyph = match key {
        Key::Rest => symbols.rest.as_str(),
        Key::Note(midi_note) => symbols.note_name(midi_note),
    };
    raw.replace(NOTE_PLACEHOLDER, glyph)
}
