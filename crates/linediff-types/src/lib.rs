//! Data types (records, reports, config) for linediff.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const REPORT_SCHEMA_V1: &str = "linediff.report.v1";

pub const TOOL_NAME: &str = "linediff";

/// Classification of one line pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        }
    }

    /// Leading marker used by the unified view.
    pub fn marker(self) -> char {
        match self {
            ChangeKind::Unchanged => ' ',
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
            ChangeKind::Modified => '~',
        }
    }
}

/// One row of a diff result.
///
/// Line numbers are 1-based; `None` means the record has no line on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffRecord {
    pub kind: ChangeKind,
    pub original_line: String,
    pub modified_line: String,
    pub original_line_number: Option<u32>,
    pub modified_line_number: Option<u32>,
}

impl DiffRecord {
    pub fn unchanged(text: &str, original_line_number: u32, modified_line_number: u32) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            original_line: text.to_string(),
            modified_line: text.to_string(),
            original_line_number: Some(original_line_number),
            modified_line_number: Some(modified_line_number),
        }
    }

    pub fn added(text: &str, modified_line_number: u32) -> Self {
        Self {
            kind: ChangeKind::Added,
            original_line: String::new(),
            modified_line: text.to_string(),
            original_line_number: None,
            modified_line_number: Some(modified_line_number),
        }
    }

    pub fn removed(text: &str, original_line_number: u32) -> Self {
        Self {
            kind: ChangeKind::Removed,
            original_line: text.to_string(),
            modified_line: String::new(),
            original_line_number: Some(original_line_number),
            modified_line_number: None,
        }
    }

    pub fn modified(
        original: &str,
        modified: &str,
        original_line_number: u32,
        modified_line_number: u32,
    ) -> Self {
        Self {
            kind: ChangeKind::Modified,
            original_line: original.to_string(),
            modified_line: modified.to_string(),
            original_line_number: Some(original_line_number),
            modified_line_number: Some(modified_line_number),
        }
    }

    /// The text a single-stream view shows for this record.
    pub fn display_text(&self) -> &str {
        match self.kind {
            ChangeKind::Removed => &self.original_line,
            _ => &self.modified_line,
        }
    }
}

/// Ordered records covering both inputs.
pub type DiffResult = Vec<DiffRecord>;

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Single pass with one-line lookahead.
    #[default]
    Lookahead,
    /// Minimal edit script (Myers).
    Myers,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Lookahead => "lookahead",
            Algorithm::Myers => "myers",
        }
    }
}

/// What to do with the empty segment after a final `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailingNewline {
    /// `"a\n"` is one line.
    #[default]
    Drop,
    /// `"a\n"` is two lines, the second empty.
    Keep,
}

/// Output format for the `diff` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Unified,
    SideBySide,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Unified => "unified",
            OutputFormat::SideBySide => "side_by_side",
            OutputFormat::Json => "json",
        }
    }
}

/// Engine options recorded alongside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffOptions {
    pub algorithm: Algorithm,
    pub trailing_newline: TrailingNewline,
    pub normalize_crlf: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Lookahead,
            trailing_newline: TrailingNewline::Drop,
            normalize_crlf: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiffStats {
    pub original_lines: u32,
    pub modified_lines: u32,
    pub unchanged: u32,
    pub added: u32,
    pub removed: u32,
    pub modified: u32,
}

impl DiffStats {
    pub fn from_records(records: &[DiffRecord]) -> Self {
        let mut stats = DiffStats::default();
        for r in records {
            if r.original_line_number.is_some() {
                stats.original_lines += 1;
            }
            if r.modified_line_number.is_some() {
                stats.modified_lines += 1;
            }
            match r.kind {
                ChangeKind::Unchanged => stats.unchanged += 1,
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Removed => stats.removed += 1,
                ChangeKind::Modified => stats.modified += 1,
            }
        }
        stats
    }

    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The JSON document emitted by `linediff diff --format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub options: DiffOptions,
    /// True when the sides were exchanged before diffing.
    #[serde(default, skip_serializing_if = "is_false")]
    pub swapped: bool,
    pub stats: DiffStats,
    pub records: Vec<DiffRecord>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The on-disk configuration file (`linediff.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConfigFile {
    /// Include other config files. Paths are relative to this config file's directory.
    /// Later files override earlier ones field by field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_newline: Option<TrailingNewline>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize_crlf: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Column width of each pane in side-by-side output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,

    /// Refuse inputs with more lines than this on either side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
}

impl Defaults {
    /// Field-wise merge: values set in `other` win.
    pub fn merged_with(self, other: Defaults) -> Defaults {
        Defaults {
            algorithm: other.algorithm.or(self.algorithm),
            trailing_newline: other.trailing_newline.or(self.trailing_newline),
            normalize_crlf: other.normalize_crlf.or(self.normalize_crlf),
            format: other.format.or(self.format),
            width: other.width.or(self.width),
            line_numbers: other.line_numbers.or(self.line_numbers),
            max_lines: other.max_lines.or(self.max_lines),
        }
    }
}

impl ConfigFile {
    /// The configuration written by `linediff init`.
    pub fn built_in() -> Self {
        Self {
            includes: vec![],
            defaults: Defaults {
                algorithm: Some(Algorithm::Lookahead),
                trailing_newline: Some(TrailingNewline::Drop),
                normalize_crlf: Some(true),
                format: Some(OutputFormat::Unified),
                width: Some(60),
                line_numbers: Some(false),
                max_lines: Some(50_000),
            },
        }
    }
}
