//! Line-level diff engine.
//!
//! This crate classifies each line of two texts as unchanged, added, removed
//! or modified. The default engine is a single left-to-right pass with
//! one-line lookahead; a Myers engine is available for minimal edit scripts.

mod lines;
mod lookahead;
mod myers;

pub use lines::{LineOptions, split_lines};
pub use linediff_types::{
    Algorithm, ChangeKind, DiffOptions, DiffRecord, DiffResult, TrailingNewline,
};

/// Diff two texts with the default options (lookahead engine, trailing
/// newline dropped, CRLF normalized).
pub fn compute_diff(original: &str, modified: &str) -> DiffResult {
    compute_diff_with(original, modified, &DiffOptions::default())
}

/// Diff two texts with explicit options.
pub fn compute_diff_with(original: &str, modified: &str, options: &DiffOptions) -> DiffResult {
    let line_opts = LineOptions::from(options);
    let original = split_lines(original, line_opts);
    let modified = split_lines(modified, line_opts);
    diff_lines(&original, &modified, options.algorithm)
}

/// Diff two already-split line sequences.
pub fn diff_lines(original: &[&str], modified: &[&str], algorithm: Algorithm) -> DiffResult {
    match algorithm {
        Algorithm::Lookahead => lookahead::diff(original, modified),
        Algorithm::Myers => myers::diff(original, modified),
    }
}

/// Converts a 0-based index to a 1-based line number.
pub(crate) fn line_no(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Emits a mismatched pair. A pair where either side is blank cannot be a
/// `modified` record, so it is split into `removed` then `added`.
pub(crate) fn push_pair(out: &mut DiffResult, original: &str, i: usize, modified: &str, j: usize) {
    if original.is_empty() || modified.is_empty() {
        out.push(DiffRecord::removed(original, line_no(i)));
        out.push(DiffRecord::added(modified, line_no(j)));
    } else {
        out.push(DiffRecord::modified(original, modified, line_no(i), line_no(j)));
    }
}
