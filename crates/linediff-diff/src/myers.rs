//! Minimal edit script via Myers' algorithm.
//!
//! Runs of deletions and insertions between two equal anchors are paired
//! positionally as modifications; the surplus on the longer side becomes
//! removals or additions.

use similar::{Algorithm as SimilarAlgorithm, DiffTag, TextDiff};

use linediff_types::{DiffRecord, DiffResult};

use crate::{line_no, push_pair};

pub(crate) fn diff(original: &[&str], modified: &[&str]) -> DiffResult {
    let text_diff = TextDiff::configure()
        .algorithm(SimilarAlgorithm::Myers)
        .diff_slices(original, modified);

    let mut out = Vec::with_capacity(original.len().max(modified.len()));
    let mut gap = Gap::default();

    for op in text_diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                gap.flush(&mut out, original, modified);
                for (i, j) in old_range.zip(new_range) {
                    out.push(DiffRecord::unchanged(original[i], line_no(i), line_no(j)));
                }
            }
            _ => {
                gap.old.extend(old_range);
                gap.new.extend(new_range);
            }
        }
    }
    gap.flush(&mut out, original, modified);

    out
}

/// Changed indices accumulated since the last equal anchor.
#[derive(Default)]
struct Gap {
    old: Vec<usize>,
    new: Vec<usize>,
}

impl Gap {
    fn flush(&mut self, out: &mut DiffResult, original: &[&str], modified: &[&str]) {
        let paired = self.old.len().min(self.new.len());

        for (&i, &j) in self.old.iter().zip(&self.new) {
            let (o, m) = (original[i], modified[j]);
            if o == m {
                out.push(DiffRecord::unchanged(o, line_no(i), line_no(j)));
            } else {
                push_pair(out, o, i, m, j);
            }
        }
        for &i in &self.old[paired..] {
            out.push(DiffRecord::removed(original[i], line_no(i)));
        }
        for &j in &self.new[paired..] {
            out.push(DiffRecord::added(modified[j], line_no(j)));
        }

        self.old.clear();
        self.new.clear();
    }
}
