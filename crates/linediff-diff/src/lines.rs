use linediff_types::{DiffOptions, TrailingNewline};

/// How raw text is cut into lines before diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOptions {
    pub trailing_newline: TrailingNewline,
    /// Strip one trailing `\r` from every line.
    pub normalize_crlf: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions::from(&DiffOptions::default())
    }
}

impl From<&DiffOptions> for LineOptions {
    fn from(o: &DiffOptions) -> Self {
        Self {
            trailing_newline: o.trailing_newline,
            normalize_crlf: o.normalize_crlf,
        }
    }
}

/// Split `text` on `\n`.
///
/// Empty text has no lines. With [`TrailingNewline::Drop`], a single empty
/// segment after a final `\n` is not a line; any earlier blank lines are kept.
pub fn split_lines(text: &str, opts: LineOptions) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<&str> = text.split('\n').collect();

    if opts.trailing_newline == TrailingNewline::Drop && lines.last() == Some(&"") {
        lines.pop();
    }

    if opts.normalize_crlf {
        for l in &mut lines {
            if let Some(stripped) = l.strip_suffix('\r') {
                *l = stripped;
            }
        }
    }

    lines
}
