//! Tick-duration to MML text conversion.
//!
//! A `NoteEncoder` is built once for a fixed timebase (ticks per quarter
//! note) and then answers read-only queries: the shortest MML token chain
//! for a duration, or the duration's breakdown into primitive note
//! lengths. Construction fills three parallel tables covering every tick
//! in `[0, tpqn*8]` (up to a double whole note); longer durations are
//! handled at query time by chaining full-length tokens with ties.

use log::debug;

use crate::error::MmlError;
use crate::note_text::{self, Key, NOTE_PLACEHOLDER};
use crate::symbols::MmlSymbols;

/// Ticks per quarter note in MML tick-notation output (`c=48` is a
/// quarter note regardless of the input timebase).
pub const OUTPUT_TPQN: i32 = 48;

/// One filled table slot during construction: the token text plus both
/// length breakdowns. `None` in the table means "no representation found
/// yet", which is distinct from the tick-0 entry (empty text, empty
/// lists).
#[derive(Debug, Clone)]
struct TableEntry {
    /// Token text in placeholder form, e.g. `"$N4."` or `"$N2^$N32"`
    text: String,
    /// Primitive note lengths, dotted notes kept whole
    lengths: Vec<i32>,
    /// Primitive note lengths, dotted notes split into their summands
    lengths_disassembled: Vec<i32>,
}

impl TableEntry {
    fn single(text: String, tick: i32, summands: Vec<i32>) -> Self {
        Self {
            text,
            lengths: vec![tick],
            lengths_disassembled: summands,
        }
    }
}

/// Converts tick durations into MML note text for one fixed timebase.
///
/// Immutable after construction; build a new encoder to change the
/// timebase or symbol dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEncoder {
    /// Glyph set used for ties, tick notation, and pitch substitution
    symbols: MmlSymbols,
    /// Ticks per quarter note of the input durations
    tpqn: i32,
    /// Highest dot count that actually occurs in the table
    max_dot_count: u32,
    /// Emit tick-notation lengths (`$N=48`) instead of table lookups
    use_ticks: bool,
    /// Canonical text per tick, dense over `[0, tpqn*8]`
    notes: Vec<String>,
    /// Primitive lengths per tick, dotted notes intact
    note_lengths: Vec<Vec<i32>>,
    /// Primitive lengths per tick, dotted notes disassembled
    note_lengths_disassembled: Vec<Vec<i32>>,
}

impl NoteEncoder {
    /// Build the conversion tables for `tpqn` ticks per quarter note.
    ///
    /// `max_dot_count` caps how many dots a single token may carry
    /// (`None` = unlimited). With `use_ticks` every duration is emitted
    /// in tick notation and the tables are only consulted for length
    /// breakdowns.
    pub fn new(
        symbols: MmlSymbols,
        tpqn: i32,
        max_dot_count: Option<u32>,
        use_ticks: bool,
    ) -> Result<Self, MmlError> {
        if tpqn <= 0 {
            return Err(MmlError::InvalidTimebase(tpqn));
        }

        let (entries, max_dot_used) = build_note_table(&symbols, tpqn, max_dot_count)?;

        let mut notes = Vec::with_capacity(entries.len());
        let mut note_lengths = Vec::with_capacity(entries.len());
        let mut note_lengths_disassembled = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Some(e) => {
                    notes.push(e.text);
                    note_lengths.push(e.lengths);
                    note_lengths_disassembled.push(e.lengths_disassembled);
                }
                // build_note_table only returns a gap-free table
                None => {
                    return Err(MmlError::UnsatisfiableTimebase {
                        tpqn,
                        max_ticks: tpqn * 8,
                    })
                }
            }
        }

        Ok(Self {
            symbols,
            tpqn,
            max_dot_count: max_dot_used,
            use_ticks,
            notes,
            note_lengths,
            note_lengths_disassembled,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// MML text for a note of `length` ticks, in placeholder form
    /// (`"$N"` where the pitch goes; octave is not included).
    ///
    /// Durations beyond a double whole note are emitted as repeated
    /// full-length tokens joined by ties, plus a remainder token;
    /// `encode(0)` is the empty string. In tick-notation mode the
    /// output is instead `"$N"`, the ticks glyph, and the duration
    /// rescaled to [`OUTPUT_TPQN`] in decimal.
    pub fn encode(&self, length: i32) -> Result<String, MmlError> {
        if length < 0 {
            return Err(MmlError::NegativeLength(length));
        }

        if self.use_ticks {
            let ticks = OUTPUT_TPQN * length / self.tpqn;
            return Ok(format!("{NOTE_PLACEHOLDER}{}{ticks}", self.symbols.ticks));
        }

        let ceiling = self.tpqn * 8;
        let mut out = String::new();
        let mut len = length;
        while len > ceiling {
            out.push_str(&self.notes[ceiling as usize]);
            out.push_str(&self.symbols.tie);
            len -= ceiling;
        }
        out.push_str(&self.notes[len as usize]);
        Ok(out)
    }

    /// Like [`encode`](Self::encode), with the placeholder substituted
    /// for a concrete pitch or rest.
    pub fn encode_keyed(&self, length: i32, key: Key) -> Result<String, MmlError> {
        let raw = self.encode(length)?;
        Ok(note_text::render(&raw, &self.symbols, key))
    }

    /// The primitive note lengths needed to express `length` ticks, in
    /// descending order per table entry. With `disassemble_dots` every
    /// dotted note is split into its undotted summands. Empty for
    /// `length == 0`.
    pub fn primitive_lengths(
        &self,
        length: i32,
        disassemble_dots: bool,
    ) -> Result<Vec<i32>, MmlError> {
        if length < 0 {
            return Err(MmlError::NegativeLength(length));
        }

        let table = if disassemble_dots {
            &self.note_lengths_disassembled
        } else {
            &self.note_lengths
        };

        let ceiling = self.tpqn * 8;
        let mut lengths = Vec::new();
        let mut len = length;
        while len > ceiling {
            lengths.extend_from_slice(&table[ceiling as usize]);
            len -= ceiling;
        }
        lengths.extend_from_slice(&table[len as usize]);
        Ok(lengths)
    }

    /// Whether `length` needs no tie within a single whole-note span:
    /// true for zero, and for any duration whose remainder modulo one
    /// whole note is a single simple or dotted token.
    pub fn is_simple_note(&self, length: i32) -> Result<bool, MmlError> {
        if length < 0 {
            return Err(MmlError::NegativeLength(length));
        }
        if length == 0 {
            return Ok(true);
        }
        let remainder = length % (self.tpqn * 4);
        Ok(self.note_lengths[remainder as usize].len() <= 1)
    }

    /// Ticks per quarter note this encoder was built for.
    pub fn tpqn(&self) -> i32 {
        self.tpqn
    }

    /// Highest dot count that occurs in the conversion table.
    pub fn max_dot_count(&self) -> u32 {
        self.max_dot_count
    }

    /// Whether this encoder emits tick-notation lengths.
    pub fn use_ticks(&self) -> bool {
        self.use_ticks
    }

    /// The glyph set this encoder renders with.
    pub fn symbols(&self) -> &MmlSymbols {
        &self.symbols
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Table construction
// ═══════════════════════════════════════════════════════════════════════

/// Fill the conversion table for every tick in `[0, tpqn*8]`.
///
/// Three phases: simple notes from the divisors of a whole note, dotted
/// variants of each simple note, then a fixed-point closure that covers
/// the remaining ticks with tie combinations. Returns the table and the
/// highest dot count used.
fn build_note_table(
    symbols: &MmlSymbols,
    tpqn: i32,
    max_dot_count: Option<u32>,
) -> Result<(Vec<Option<TableEntry>>, u32), MmlError> {
    let whole = tpqn * 4;
    let ceiling = tpqn * 8;
    let size = (ceiling + 1) as usize;

    let mut entries: Vec<Option<TableEntry>> = vec![None; size];
    entries[0] = Some(TableEntry {
        text: String::new(),
        lengths: Vec::new(),
        lengths_disassembled: Vec::new(),
    });

    // Single-token entries (simple or dotted). Only these may appear as
    // the second half of a tie combination.
    let mut singles: Vec<Option<TableEntry>> = vec![None; size];

    // ─── Phase 1 + 2: simple notes and their dotted variants ───────────
    let mut max_dot_used: u32 = 0;
    for denom in 1..=whole {
        if whole % denom != 0 {
            continue;
        }
        let base_tick = whole / denom;

        let text = format!("{NOTE_PLACEHOLDER}{denom}");
        let entry = TableEntry::single(text.clone(), base_tick, vec![base_tick]);
        singles[base_tick as usize] = Some(entry.clone());
        entries[base_tick as usize] = Some(entry);

        // Each dot adds half of the previous increment; stop once the
        // base tick no longer splits evenly, the cap or the table
        // ceiling is hit, or the tick already has a shorter spelling
        // (c6. == c4, so the first writer wins).
        let mut text = text;
        let mut tick = base_tick;
        let mut summands = vec![base_tick];
        let mut dot: u32 = 1;
        while dot <= base_tick.trailing_zeros() {
            if max_dot_count.is_some_and(|cap| dot > cap) {
                break;
            }
            text.push('.');
            tick += base_tick >> dot;
            if tick > ceiling || entries[tick as usize].is_some() {
                break;
            }
            summands.push(base_tick >> dot);
            let entry = TableEntry::single(text.clone(), tick, summands.clone());
            singles[tick as usize] = Some(entry.clone());
            entries[tick as usize] = Some(entry);
            max_dot_used = dot;
            dot += 1;
        }
    }
    debug!("max dot count used for tpqn {tpqn}: {max_dot_used}");

    // ─── Phase 3: tie-combination closure ───────────────────────────────
    // Each pass reads a snapshot of the previous pass's table so that
    // entries written within a pass cannot feed later combinations of
    // the same pass. The filled set only grows, so a pass that assigns
    // nothing has reached the fixed point.
    let mut passes: u32 = 0;
    loop {
        passes += 1;
        let prev = entries.clone();
        let mut assigned_any = false;

        for tick in 1..size {
            if entries[tick].is_some() {
                continue;
            }

            // Scan splits tick = a + b with a descending; a must exist
            // in the snapshot, b must be a single token. Shortest text
            // wins, the first find wins exact ties.
            let mut best: Option<TableEntry> = None;
            for sub in (1..tick).rev() {
                let (Some(a), Some(b)) = (prev[sub].as_ref(), singles[tick - sub].as_ref())
                else {
                    continue;
                };
                let text = format!("{}{}{}", a.text, symbols.tie, b.text);
                if best.as_ref().map_or(true, |e| e.text.len() > text.len()) {
                    let mut lengths = a.lengths.clone();
                    lengths.extend_from_slice(&b.lengths);
                    let mut lengths_disassembled = a.lengths_disassembled.clone();
                    lengths_disassembled.extend_from_slice(&b.lengths_disassembled);
                    best = Some(TableEntry {
                        text,
                        lengths,
                        lengths_disassembled,
                    });
                }
            }

            if let Some(entry) = best {
                entries[tick] = Some(entry);
                assigned_any = true;
            }
        }

        if entries.iter().all(|e| e.is_some()) {
            break;
        }
        if !assigned_any {
            // Fixed point with gaps left: no divisor chain reaches the
            // missing ticks, and further passes cannot change that.
            return Err(MmlError::UnsatisfiableTimebase {
                tpqn,
                max_ticks: ceiling,
            });
        }
    }
    debug!("note table for tpqn {tpqn} filled after {passes} passes");

    // ─── Phase 4: canonical ordering of the length lists ────────────────
    for entry in entries.iter_mut().flatten() {
        entry.lengths.sort_unstable_by(|a, b| b.cmp(a));
        entry
            .lengths_disassembled
            .sort_unstable_by(|a, b| b.cmp(a));
    }

    Ok((entries, max_dot_used))
}
