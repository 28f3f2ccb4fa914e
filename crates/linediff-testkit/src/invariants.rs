//! Structural checks every diff result must pass, whichever engine made it.

use linediff_types::{ChangeKind, DiffRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("record {index}: {side} line number {found:?}, expected {expected}")]
    LineNumber {
        index: usize,
        side: &'static str,
        found: Option<u32>,
        expected: u32,
    },
    #[error("{side} side covers {covered} of {total} lines")]
    Coverage {
        side: &'static str,
        covered: usize,
        total: usize,
    },
    #[error("record {index}: {side} text {found:?} does not match input {expected:?}")]
    Text {
        index: usize,
        side: &'static str,
        found: String,
        expected: String,
    },
    #[error("record {index}: {kind} record breaks its shape: {reason}")]
    Shape {
        index: usize,
        kind: &'static str,
        reason: &'static str,
    },
}

/// Check `records` against the split inputs they were computed from.
///
/// Verifies line coverage (each side's numbers run 1..=n without gaps),
/// that record text matches the input at that number, and per-kind shape:
/// unchanged texts are equal, added/removed records leave the other side
/// empty, modified records pair two non-empty differing lines.
pub fn check_invariants(
    records: &[DiffRecord],
    original: &[&str],
    modified: &[&str],
) -> Result<(), InvariantViolation> {
    let mut next_orig = 1u32;
    let mut next_mod = 1u32;

    for (index, r) in records.iter().enumerate() {
        if let Some(n) = r.original_line_number {
            if n != next_orig {
                return Err(InvariantViolation::LineNumber {
                    index,
                    side: "original",
                    found: Some(n),
                    expected: next_orig,
                });
            }
            let expected = original.get(n as usize - 1).copied().unwrap_or_default();
            if r.original_line != expected {
                return Err(InvariantViolation::Text {
                    index,
                    side: "original",
                    found: r.original_line.clone(),
                    expected: expected.to_string(),
                });
            }
            next_orig += 1;
        }

        if let Some(n) = r.modified_line_number {
            if n != next_mod {
                return Err(InvariantViolation::LineNumber {
                    index,
                    side: "modified",
                    found: Some(n),
                    expected: next_mod,
                });
            }
            let expected = modified.get(n as usize - 1).copied().unwrap_or_default();
            if r.modified_line != expected {
                return Err(InvariantViolation::Text {
                    index,
                    side: "modified",
                    found: r.modified_line.clone(),
                    expected: expected.to_string(),
                });
            }
            next_mod += 1;
        }

        check_shape(index, r)?;
    }

    let covered = next_orig as usize - 1;
    if covered != original.len() {
        return Err(InvariantViolation::Coverage {
            side: "original",
            covered,
            total: original.len(),
        });
    }
    let covered = next_mod as usize - 1;
    if covered != modified.len() {
        return Err(InvariantViolation::Coverage {
            side: "modified",
            covered,
            total: modified.len(),
        });
    }

    Ok(())
}

fn check_shape(index: usize, r: &DiffRecord) -> Result<(), InvariantViolation> {
    let kind = r.kind.as_str();
    let fail = |reason| Err(InvariantViolation::Shape { index, kind, reason });

    let both = r.original_line_number.is_some() && r.modified_line_number.is_some();
    match r.kind {
        ChangeKind::Unchanged => {
            if !both {
                return fail("missing a line number");
            }
            if r.original_line != r.modified_line {
                return fail("texts differ");
            }
        }
        ChangeKind::Added => {
            if r.original_line_number.is_some() || !r.original_line.is_empty() {
                return fail("has an original side");
            }
        }
        ChangeKind::Removed => {
            if r.modified_line_number.is_some() || !r.modified_line.is_empty() {
                return fail("has a modified side");
            }
        }
        ChangeKind::Modified => {
            if !both {
                return fail("missing a line number");
            }
            if r.original_line.is_empty() || r.modified_line.is_empty() {
                return fail("pairs a blank line");
            }
            if r.original_line == r.modified_line {
                return fail("texts are equal");
            }
        }
    }
    Ok(())
}
