use linediff_types::{ChangeKind, DiffRecord};

/// Separates the replaced text from its replacement on modified rows.
const REPLACED_BY: &str = "→";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnifiedOptions {
    /// Prefix each row with the original and modified line numbers.
    pub line_numbers: bool,
}

/// Render records as a single stream, one row per record, in record order.
///
/// Each row is the kind's marker (`' '`, `+`, `-`, `~`) followed by the
/// line text: the original side for removals, the modified side for
/// additions and unchanged lines, and `old → new` for modifications.
pub fn render_unified(records: &[DiffRecord], opts: &UnifiedOptions) -> String {
    let mut out = String::new();

    for r in records {
        if opts.line_numbers {
            out.push_str(&format!(
                "{:>4} {:>4} ",
                number(r.original_line_number),
                number(r.modified_line_number)
            ));
        }

        out.push(r.kind.marker());
        if r.kind == ChangeKind::Modified {
            out.push_str(&format!(
                " {} {REPLACED_BY} {}",
                r.original_line, r.modified_line
            ));
        } else {
            let text = r.display_text();
            if !text.is_empty() {
                out.push(' ');
                out.push_str(text);
            }
        }
        out.push('\n');
    }

    out
}

pub(crate) fn number(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}
