use linediff_types::{ChangeKind, DiffRecord};

use crate::unified::number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideBySideOptions {
    /// Width of each text pane, in chars.
    pub width: usize,
}

impl Default for SideBySideOptions {
    fn default() -> Self {
        Self { width: 60 }
    }
}

/// Render records as two panes, one row per record.
///
/// The gutter between panes is blank for unchanged rows, `>` for additions,
/// `<` for removals and `|` for modifications. Rows carry no trailing
/// padding, but text in the right pane is printed as is.
pub fn render_side_by_side(records: &[DiffRecord], opts: &SideBySideOptions) -> String {
    let width = opts.width.max(1);
    let mut out = String::new();

    for r in records {
        let gutter = match r.kind {
            ChangeKind::Unchanged => ' ',
            ChangeKind::Added => '>',
            ChangeKind::Removed => '<',
            ChangeKind::Modified => '|',
        };
        let mut row = format!(
            "{:>4} {:<width$} {} {:>4}",
            number(r.original_line_number),
            truncate(&r.original_line, width),
            gutter,
            number(r.modified_line_number),
        );
        // Only padding is trimmed; the right pane keeps its own trailing spaces.
        let right = truncate(&r.modified_line, width);
        if right.is_empty() {
            row.truncate(row.trim_end().len());
        } else {
            row.push(' ');
            row.push_str(&right);
        }
        out.push_str(&row);
        out.push('\n');
    }

    out
}

/// Cut `text` to at most `width` chars, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
