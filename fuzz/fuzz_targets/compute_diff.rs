//! Fuzz target for both diff engines.
//!
//! Any pair of texts must diff without panicking, and the records must cover
//! each side exactly once with consistent numbering.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use linediff_diff::{
    Algorithm, DiffOptions, LineOptions, TrailingNewline, compute_diff_with, split_lines,
};
use linediff_testkit::check_invariants;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    original: String,
    modified: String,
    myers: bool,
    keep_trailing_newline: bool,
    normalize_crlf: bool,
}

fuzz_target!(|input: FuzzInput| {
    let opts = DiffOptions {
        algorithm: if input.myers {
            Algorithm::Myers
        } else {
            Algorithm::Lookahead
        },
        trailing_newline: if input.keep_trailing_newline {
            TrailingNewline::Keep
        } else {
            TrailingNewline::Drop
        },
        normalize_crlf: input.normalize_crlf,
    };

    let records = compute_diff_with(&input.original, &input.modified, &opts);

    let line_opts = LineOptions::from(&opts);
    let original = split_lines(&input.original, line_opts);
    let modified = split_lines(&input.modified, line_opts);
    if let Err(violation) = check_invariants(&records, &original, &modified) {
        panic!("invariant violated: {violation}");
    }
});
