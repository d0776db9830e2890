//! Error taxonomy for the encoder.
//!
//! Invalid inputs fail fast and leave nothing half-built: a failed
//! construction never yields a usable encoder, and a failed query never
//! yields truncated text or a partial length list.

use thiserror::Error;

/// Errors produced by encoder construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MmlError {
    /// A query was given a negative note length.
    #[error("note length must not be negative, got {0}")]
    NegativeLength(i32),

    /// The timebase is not a positive number of ticks per quarter note.
    #[error("timebase must be a positive tick count, got {0}")]
    InvalidTimebase(i32),

    /// The tie-closure fill reached a fixed point with gaps left in the
    /// table: the timebase has no divisor chain fine enough to express
    /// every tick in `[0, tpqn*8]`.
    #[error("timebase {tpqn} cannot express every duration up to {max_ticks} ticks")]
    UnsatisfiableTimebase {
        /// The rejected ticks-per-quarter-note value.
        tpqn: i32,
        /// The domain ceiling (`tpqn * 8`) the table must cover.
        max_ticks: i32,
    },
}
