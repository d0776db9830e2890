//! Integration tests for the duration encoder: table invariants over the
//! whole domain, concrete conversion scenarios, and error behavior.

use pretty_assertions::assert_eq;

use mmlnote::{encoder_for_timebase, Key, MmlError, MmlSymbols, NoteEncoder};

/// Timebases exercised by the domain-wide invariant tests.
const TIMEBASES: [i32; 3] = [24, 48, 96];

fn encoder(tpqn: i32) -> NoteEncoder {
    let _ = env_logger::builder().is_test(true).try_init();
    encoder_for_timebase(tpqn).expect("table construction failed")
}

// ═══════════════════════════════════════════════════════════════════════
// Domain-wide invariants
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn primitive_lengths_sum_exactly() {
    for tpqn in TIMEBASES {
        let enc = encoder(tpqn);
        for t in 0..=(tpqn * 8) {
            for disassemble in [false, true] {
                let lengths = enc.primitive_lengths(t, disassemble).unwrap();
                assert_eq!(
                    lengths.iter().sum::<i32>(),
                    t,
                    "tpqn={tpqn} t={t} disassemble={disassemble}: {lengths:?}"
                );
            }
        }
    }
}

#[test]
fn disassembled_elements_are_undotted_primitives() {
    // Every element of a dots-disassembled breakdown must be directly
    // expressible as an undotted note, i.e. divide the whole note evenly.
    for tpqn in TIMEBASES {
        let enc = encoder(tpqn);
        let whole = tpqn * 4;
        for t in 1..=(tpqn * 8) {
            for element in enc.primitive_lengths(t, true).unwrap() {
                assert!(
                    element > 0 && whole % element == 0,
                    "tpqn={tpqn} t={t}: element {element} is not a divisor of {whole}"
                );
            }
        }
    }
}

#[test]
fn every_entry_renders_nonempty_text() {
    for tpqn in TIMEBASES {
        let enc = encoder(tpqn);
        for t in 1..=(tpqn * 8) {
            let text = enc.encode(t).unwrap();
            assert!(!text.is_empty(), "tpqn={tpqn} t={t} produced empty text");
            assert!(
                text.starts_with("$N"),
                "tpqn={tpqn} t={t} text {text:?} lacks the pitch placeholder"
            );
        }
    }
}

#[test]
fn construction_is_deterministic() {
    for tpqn in TIMEBASES {
        let a = NoteEncoder::new(MmlSymbols::default(), tpqn, None, false).unwrap();
        let b = NoteEncoder::new(MmlSymbols::default(), tpqn, None, false).unwrap();
        assert_eq!(a, b, "tpqn={tpqn}: identical configs built different tables");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Concrete scenarios (tpqn = 96)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn quarter_note_and_dots() {
    let enc = encoder(96);
    assert_eq!(enc.encode(0).unwrap(), "");
    assert_eq!(enc.encode(96).unwrap(), "$N4");
    assert_eq!(enc.encode(144).unwrap(), "$N4."); // 96 + 48
    assert_eq!(enc.encode(168).unwrap(), "$N4.."); // 96 + 48 + 24
    assert_eq!(enc.encode(384).unwrap(), "$N1");
    assert_eq!(enc.encode(768).unwrap(), "$N1^$N1");
}

#[test]
fn awkward_length_becomes_minimal_tie_chain() {
    let enc = encoder(96);
    // 100 ticks has no single-token spelling
    assert_eq!(enc.encode(100).unwrap(), "$N4^$N96");

    let lengths = enc.primitive_lengths(100, false).unwrap();
    assert_eq!(lengths.len(), 2);
    assert_eq!(lengths.iter().sum::<i32>(), 100);
}

#[test]
fn lengths_beyond_the_ceiling_chain_full_notes() {
    let enc = encoder(96);
    // 900 = 768 (double whole) + 132
    assert_eq!(enc.encode(900).unwrap(), "$N1^$N1^$N3^$N96");
    assert_eq!(
        enc.primitive_lengths(900, false).unwrap(),
        vec![384, 384, 128, 4]
    );

    // several ceilings deep
    let lengths = enc.primitive_lengths(768 * 3 + 100, false).unwrap();
    assert_eq!(lengths.iter().sum::<i32>(), 768 * 3 + 100);
}

#[test]
fn keyed_rendering_tags_every_token() {
    let enc = encoder(96);
    assert_eq!(enc.encode_keyed(96, Key::Note(60)).unwrap(), "c4");
    assert_eq!(enc.encode_keyed(96, Key::Rest).unwrap(), "r4");
    assert_eq!(enc.encode_keyed(100, Key::Note(61)).unwrap(), "c+4^c+96");
    assert_eq!(enc.encode_keyed(900, Key::Note(57)).unwrap(), "a1^a1^a3^a96");
    assert_eq!(enc.encode_keyed(0, Key::Rest).unwrap(), "");
}

#[test]
fn simple_note_queries() {
    let enc = encoder(96);
    assert!(enc.is_simple_note(0).unwrap());
    assert!(enc.is_simple_note(96).unwrap());
    assert!(enc.is_simple_note(168).unwrap());
    // remainder modulo a whole note decides, so whole-note multiples
    // and ceiling-chained lengths count as simple too
    assert!(enc.is_simple_note(384 + 96).unwrap());
    assert!(!enc.is_simple_note(100).unwrap());
    assert!(!enc.is_simple_note(384 + 100).unwrap());
}

#[test]
fn discovered_dot_counts() {
    // whole = tpqn*4; the longest halving chain starts at the whole note
    assert_eq!(encoder(96).max_dot_count(), 7); // 384 = 2^7 * 3
    assert_eq!(encoder(48).max_dot_count(), 6); // 192 = 2^6 * 3

    let capped = NoteEncoder::new(MmlSymbols::default(), 96, Some(2), false).unwrap();
    assert_eq!(capped.max_dot_count(), 2);
    for t in 0..=(96 * 8) {
        let text = capped.encode(t).unwrap();
        assert!(!text.contains("..."), "t={t}: {text} exceeds the dot cap");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tick-notation mode
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn tick_notation_rescales_to_output_timebase() {
    let enc = NoteEncoder::new(MmlSymbols::default(), 96, None, true).unwrap();
    assert!(enc.use_ticks());
    assert_eq!(enc.encode(96).unwrap(), "$N=48");
    assert_eq!(enc.encode(384).unwrap(), "$N=192");
    assert_eq!(enc.encode(0).unwrap(), "$N=0");
    assert_eq!(enc.encode_keyed(96, Key::Note(62)).unwrap(), "d=48");

    // length breakdowns still come from the tables
    assert_eq!(enc.primitive_lengths(144, true).unwrap(), vec![96, 48]);
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn negative_lengths_fail_every_query() {
    let enc = encoder(48);
    assert_eq!(enc.encode(-1), Err(MmlError::NegativeLength(-1)));
    assert_eq!(
        enc.encode_keyed(-1, Key::Note(60)),
        Err(MmlError::NegativeLength(-1))
    );
    assert_eq!(
        enc.primitive_lengths(-7, false),
        Err(MmlError::NegativeLength(-7))
    );
    assert_eq!(enc.is_simple_note(-7), Err(MmlError::NegativeLength(-7)));
}

#[test]
fn non_positive_timebases_fail_construction() {
    assert_eq!(
        encoder_for_timebase(0),
        Err(MmlError::InvalidTimebase(0))
    );
    assert_eq!(
        encoder_for_timebase(-96),
        Err(MmlError::InvalidTimebase(-96))
    );
}
