//! Single-pass diff with one-line lookahead.
//!
//! Two cursors walk the sequences. On a mismatch the engine asks whether the
//! current original line reappears later in the modified sequence, and vice
//! versa, and picks insertion, deletion or modification from the answers.
//! This is not a minimal edit script: a moved block shows up as removals and
//! additions.

use std::collections::HashMap;

use linediff_types::{DiffRecord, DiffResult};

use crate::{line_no, push_pair};

/// Positions of each distinct line, ascending.
struct LineIndex<'a> {
    positions: HashMap<&'a str, Vec<usize>>,
}

impl<'a> LineIndex<'a> {
    fn new(lines: &[&'a str]) -> Self {
        let mut positions: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, &line) in lines.iter().enumerate() {
            positions.entry(line).or_default().push(idx);
        }
        Self { positions }
    }

    /// Offset of the first occurrence of `line` at or after `from`, relative
    /// to `from`. Equivalent to `lines[from..].iter().position(..)`.
    fn offset_from(&self, line: &str, from: usize) -> Option<usize> {
        let pos = self.positions.get(line)?;
        let k = pos.partition_point(|&p| p < from);
        pos.get(k).map(|&p| p - from)
    }
}

pub(crate) fn diff(original: &[&str], modified: &[&str]) -> DiffResult {
    let orig_index = LineIndex::new(original);
    let mod_index = LineIndex::new(modified);

    let mut out = Vec::with_capacity(original.len().max(modified.len()));
    let mut i = 0usize;
    let mut j = 0usize;

    while i < original.len() || j < modified.len() {
        if i >= original.len() {
            out.push(DiffRecord::added(modified[j], line_no(j)));
            j += 1;
            continue;
        }

        if j >= modified.len() {
            out.push(DiffRecord::removed(original[i], line_no(i)));
            i += 1;
            continue;
        }

        let (o, m) = (original[i], modified[j]);
        if o == m {
            out.push(DiffRecord::unchanged(o, line_no(i), line_no(j)));
            i += 1;
            j += 1;
            continue;
        }

        let next_orig_match = mod_index.offset_from(o, j + 1);
        let next_mod_match = orig_index.offset_from(m, i + 1);

        match (next_orig_match, next_mod_match) {
            (None, None) => {
                push_pair(&mut out, o, i, m, j);
                i += 1;
                j += 1;
            }
            (Some(a), b) if b.is_none_or(|b| a < b) => {
                out.push(DiffRecord::added(m, line_no(j)));
                j += 1;
            }
            _ => {
                out.push(DiffRecord::removed(o, line_no(i)));
                i += 1;
            }
        }
    }

    out
}
