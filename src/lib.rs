//! mmlnote — MML note/duration encoding engine for score translation.
//!
//! Converts integer tick durations under a fixed timebase into the
//! shortest exact Music Macro Language token chain, and decomposes
//! durations into their primitive note lengths. The conversion tables
//! are built once per timebase and queried read-only afterwards.
//!
//! # Example
//! ```
//! use mmlnote::{encoder_for_timebase, Key};
//!
//! let encoder = encoder_for_timebase(96).unwrap();
//! assert_eq!(encoder.encode(144).unwrap(), "$N4.");
//! assert_eq!(encoder.encode_keyed(144, Key::Note(60)).unwrap(), "c4.");
//! assert_eq!(encoder.primitive_lengths(144, true).unwrap(), vec![96, 48]);
//! ```

pub mod encoder;
pub mod error;
pub mod note_text;
pub mod symbols;

pub use encoder::{NoteEncoder, OUTPUT_TPQN};
pub use error::MmlError;
pub use note_text::{render, Key, NOTE_PLACEHOLDER};
pub use symbols::MmlSymbols;

/// Build an encoder with the default MML symbol dialect, unlimited dots,
/// and table-based note lengths.
///
/// Convenience wrapper around [`NoteEncoder::new`] for the common case;
/// use the constructor directly for custom dialects, a dot cap, or
/// tick-notation output.
pub fn encoder_for_timebase(tpqn: i32) -> Result<NoteEncoder, MmlError> {
    NoteEncoder::new(MmlSymbols::default(), tpqn, None, false)
}
