/// Section headings for [`render_export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLabels {
    pub original: String,
    pub modified: String,
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self {
            original: "Original".to_string(),
            modified: "Modified".to_string(),
        }
    }
}

/// Serialize both full texts into one plain-text document.
///
/// This exports the inputs, not the diff records. Each text gets a labelled
/// section and is newline-terminated.
pub fn render_export(original: &str, modified: &str, labels: &ExportLabels) -> String {
    let mut out = String::with_capacity(original.len() + modified.len() + 64);
    push_section(&mut out, &labels.original, original);
    out.push('\n');
    push_section(&mut out, &labels.modified, modified);
    out
}

fn push_section(out: &mut String, label: &str, text: &str) {
    out.push_str(&format!("=== {label} ===\n"));
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
}
