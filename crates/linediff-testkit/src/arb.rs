//! Proptest strategies for generating diff inputs.
//!
//! Lines are drawn from a small alphabet so that generated pairs share lines
//! often; uniformly random strings almost never match and only exercise the
//! modification branch.
//!
//! # Bounds
//!
//! - Max lines per side: 24
//! - Line vocabulary: 8 short words plus the blank line

use proptest::prelude::*;

/// Maximum number of lines per generated side.
pub const MAX_LINES: usize = 24;

const VOCABULARY: &[&str] = &[
    "",
    "fn main() {",
    "}",
    "    let x = 1;",
    "    let y = 2;",
    "    return x;",
    "// note",
    "use std::io;",
    "alpha",
];

/// Strategy for one line from the shared vocabulary.
pub fn arb_line() -> impl Strategy<Value = String> {
    prop::sample::select(VOCABULARY).prop_map(|s| s.to_string())
}

/// Strategy for a sequence of up to [`MAX_LINES`] vocabulary lines.
pub fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_line(), 0..=MAX_LINES)
}

/// Strategy for a text built from vocabulary lines, optionally newline-terminated.
pub fn arb_text() -> impl Strategy<Value = String> {
    (arb_lines(), any::<bool>()).prop_map(|(lines, trailing)| {
        let mut text = lines.join("\n");
        if trailing && !lines.is_empty() {
            text.push('\n');
        }
        text
    })
}

/// Strategy for an (original, modified) pair where the modified text is an
/// edit of the original: some lines dropped, some inserted, some changed.
pub fn arb_text_pair() -> impl Strategy<Value = (String, String)> {
    (arb_lines(), prop::collection::vec((0u8..4, arb_line()), 0..=MAX_LINES)).prop_map(
        |(original, edits)| {
            let mut modified = Vec::with_capacity(original.len());
            let mut edits = edits.into_iter();
            for line in &original {
                match edits.next() {
                    Some((0, _)) => {}
                    Some((1, new)) => {
                        modified.push(new);
                        modified.push(line.clone());
                    }
                    Some((2, new)) => modified.push(new),
                    _ => modified.push(line.clone()),
                }
            }
            (original.join("\n"), modified.join("\n"))
        },
    )
}

/// Strategy for arbitrary Unicode text, including `\r` and blank lines.
pub fn arb_unicode_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[^\n]{0,12}", 0..12).prop_map(|lines| lines.join("\n"))
}
