// Allow our units.fraction digit grouping convention (e.g., 44_2600 = 44.26)
#![allow(clippy::inconsistent_digit_grouping)]

//! End-to-end runs over full event streams.

use std::io::Write;

use book_pricer::{Config, EventError, RunStats, Session, Side};

const SAMPLE: &str = "\
28800538 A b S 44.26 100
28800562 A c B 44.10 100
28800744 R b 100
28800758 A d B 44.18 157
28800773 A e S 44.38 100
28800796 R d 157
28800812 A f B 44.18 157
28800974 A g S 44.27 100
28800975 R e 100
28812071 R f 100
28813129 A h B 43.68 50
28813300 R f 57
28813830 A i S 44.18 100
28814087 A j S 44.18 1000
28814834 R c 100
28814864 A k B 44.09 100
28815774 R k 100
28815804 A l B 44.07 175
28815937 R j 1000
28816245 A m S 44.22 100
";

fn run(target: u64, input: &str) -> (String, RunStats) {
    let mut session = Session::new(&Config::with_target(target).unwrap());
    let mut out = Vec::new();
    let stats = session.run(input.as_bytes(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

// ============================================================================
// Canonical sample
// ============================================================================

#[test]
fn sample_target_200() {
    let (out, stats) = run(200, SAMPLE);

    assert_eq!(
        out,
        "\
28800758 S 8832.56
28800796 S NA
28800812 S 8832.56
28800974 B 8865.00
28800975 B NA
28812071 S NA
28813129 S 8806.50
28813300 S NA
28813830 B 8845.00
28814087 B 8836.00
28815804 S 8804.25
28815937 B 8845.00
28816245 B 8840.00
"
    );
    assert_eq!(
        stats,
        RunStats {
            lines: 20,
            events: 20,
            skipped: 0,
            quotes: 13,
        }
    );
}

#[test]
fn sample_target_1() {
    let (out, _) = run(1, SAMPLE);

    assert_eq!(
        out,
        "\
28800538 B 44.26
28800562 S 44.10
28800744 B NA
28800758 S 44.18
28800773 B 44.38
28800796 S 44.10
28800812 S 44.18
28800974 B 44.27
28813300 S 44.10
28813830 B 44.18
28814834 S 43.68
28814864 S 44.09
28815774 S 43.68
28815804 S 44.07
"
    );
}

#[test]
fn sample_target_too_large_prints_nothing() {
    let (out, stats) = run(1_000_000, SAMPLE);

    assert!(out.is_empty());
    assert_eq!(stats.events, 20);
    assert_eq!(stats.quotes, 0);
}

#[test]
fn sample_book_state_at_end() {
    let mut session = Session::new(&Config::with_target(200).unwrap());
    for line in SAMPLE.lines() {
        session.process_line(line).unwrap();
    }

    let book = session.book();
    // Bids left: h 50@43.68, l 175@44.07
    assert_eq!(book.total_size(Side::Buy), 225);
    // Asks left: g 100@44.27, i 100@44.18, m 100@44.22
    assert_eq!(book.total_size(Side::Sell), 300);
    assert_eq!(book.bids().order_count(), 2);
    assert_eq!(book.asks().order_count(), 3);
    assert!(session.target_reached(Side::Buy));
    assert!(session.target_reached(Side::Sell));
}

// ============================================================================
// Bad input in the stream
// ============================================================================

#[test]
fn bad_lines_are_skipped_and_stream_continues() {
    let input = "\
1 A a B 10.00 5
garbage
2 R missing 3
3 A b X 10.00 5
4 A c S ten 5

5 A d S 11.00 5
";
    let (out, stats) = run(5, input);

    assert_eq!(out, "1 S 50.00\n5 B 55.00\n");
    assert_eq!(
        stats,
        RunStats {
            lines: 7,
            events: 2,
            skipped: 4,
            quotes: 2,
        }
    );
}

#[test]
fn unknown_reduce_leaves_book_unchanged() {
    let mut session = Session::new(&Config::with_target(5).unwrap());
    session.process_line("1 A a B 10.00 5").unwrap();

    let err = session.process_line("2 R b 5").unwrap_err();

    assert_eq!(err.to_string(), "cannot find order b to reduce");
    assert!(matches!(err, EventError::UnknownOrder(_)));
    assert_eq!(session.book().total_size(Side::Buy), 5);
}

// ============================================================================
// Duplicate suppression
// ============================================================================

#[test]
fn unchanged_result_is_not_repeated() {
    let input = "\
1 A a S 10.00 5
2 A b S 10.00 5
3 R b 5
4 A c S 9.00 0
5 A d S 9.00 1
";
    // 2 and 3 touch nothing the valuation used; 4 forces a recompute with
    // the same result; 5 changes it.
    let (out, _) = run(5, input);

    assert_eq!(out, "1 B 50.00\n5 B 49.00\n");
}

#[test]
fn same_amount_reemitted_after_na() {
    let input = "\
1 A a B 10.00 5
2 R a 5
3 A b B 10.00 5
";
    let (out, _) = run(5, input);

    assert_eq!(out, "1 S 50.00\n2 S NA\n3 S 50.00\n");
}

// ============================================================================
// Config file driven run
// ============================================================================

#[test]
fn run_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pricer]\ntarget = 200\n\n[logging]\nlevel = \"info\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    let mut session = Session::new(&config);
    let mut out = Vec::new();
    session.run(SAMPLE.as_bytes(), &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().count(), 13);
    assert_eq!(out.lines().next(), Some("28800758 S 8832.56"));
}
