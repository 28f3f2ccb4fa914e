use std::fmt;

use tracing::debug;

use linediff_diff::{LineOptions, diff_lines, split_lines};
use linediff_types::{DiffOptions, DiffReport, DiffStats, REPORT_SCHEMA_V1, TOOL_NAME, ToolMeta};

/// Fully resolved settings for one diff run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffPlan {
    pub options: DiffOptions,
    /// Exchange the two inputs before diffing.
    pub swap: bool,
    /// Refuse inputs with more lines than this on either side.
    pub max_lines: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRun {
    pub report: DiffReport,
}

impl DiffRun {
    pub fn has_changes(&self) -> bool {
        !self.report.stats.is_identical()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Original => "original",
            Side::Modified => "modified",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    #[error("{side} input has {lines} lines, over the limit of {limit}")]
    InputTooLarge {
        side: Side,
        lines: usize,
        limit: usize,
    },
}

/// Diff `original` against `modified` according to `plan`.
///
/// The only failure is the size guard; the diff itself is total.
pub fn run_diff(plan: &DiffPlan, original: &str, modified: &str) -> Result<DiffRun, DiffError> {
    let (original, modified) = if plan.swap {
        (modified, original)
    } else {
        (original, modified)
    };

    let line_opts = LineOptions::from(&plan.options);
    let original_lines = split_lines(original, line_opts);
    let modified_lines = split_lines(modified, line_opts);

    if let Some(limit) = plan.max_lines {
        for (side, lines) in [
            (Side::Original, original_lines.len()),
            (Side::Modified, modified_lines.len()),
        ] {
            if lines > limit {
                return Err(DiffError::InputTooLarge { side, lines, limit });
            }
        }
    }

    debug!(
        "Diffing {} vs {} line(s) with {}",
        original_lines.len(),
        modified_lines.len(),
        plan.options.algorithm.as_str()
    );

    let records = diff_lines(&original_lines, &modified_lines, plan.options.algorithm);
    let stats = DiffStats::from_records(&records);

    debug!(
        "{} unchanged, {} added, {} removed, {} modified",
        stats.unchanged, stats.added, stats.removed, stats.modified
    );

    Ok(DiffRun {
        report: DiffReport {
            schema: REPORT_SCHEMA_V1.to_string(),
            tool: ToolMeta {
                name: TOOL_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            options: plan.options,
            swapped: plan.swap,
            stats,
            records,
        },
    })
}

/// Pretty JSON for a report, newline-terminated.
pub fn render_report_json(report: &DiffReport) -> Result<String, serde_json::Error> {
    let mut s = serde_json::to_string_pretty(report)?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linediff_types::{Algorithm, ChangeKind, DiffRecord};

    #[test]
    fn reports_stats_and_records() {
        let run = run_diff(&DiffPlan::default(), "a\nb\n", "a\nc\n").unwrap();
        assert_eq!(run.report.schema, REPORT_SCHEMA_V1);
        assert_eq!(run.report.stats.original_lines, 2);
        assert_eq!(run.report.stats.modified, 1);
        assert!(run.has_changes());
        assert_eq!(run.report.records[1], DiffRecord::modified("b", "c", 2, 2));
    }

    #[test]
    fn swap_exchanges_sides() {
        let plan = DiffPlan {
            swap: true,
            ..DiffPlan::default()
        };
        let run = run_diff(&plan, "", "x").unwrap();
        assert!(run.report.swapped);
        assert_eq!(run.report.records, vec![DiffRecord::removed("x", 1)]);
    }

    #[test]
    fn identical_inputs_have_no_changes() {
        let run = run_diff(&DiffPlan::default(), "same\n", "same\n").unwrap();
        assert!(!run.has_changes());
    }

    #[test]
    fn size_guard_names_the_side() {
        let plan = DiffPlan {
            max_lines: Some(2),
            ..DiffPlan::default()
        };
        let err = run_diff(&plan, "a\nb", "a\nb\nc").unwrap_err();
        assert_eq!(
            err,
            DiffError::InputTooLarge {
                side: Side::Modified,
                lines: 3,
                limit: 2,
            }
        );
        assert_eq!(
            err.to_string(),
            "modified input has 3 lines, over the limit of 2"
        );
    }

    #[test]
    fn plan_algorithm_is_used_and_recorded() {
        let plan = DiffPlan {
            options: DiffOptions {
                algorithm: Algorithm::Myers,
                ..DiffOptions::default()
            },
            ..DiffPlan::default()
        };
        let run = run_diff(&plan, "k\na\nb", "a\nb\nk").unwrap();
        assert_eq!(run.report.options.algorithm, Algorithm::Myers);
        let kinds: Vec<_> = run.report.records.iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&ChangeKind::Unchanged));
    }

    #[test]
    fn json_output_is_parseable() {
        let run = run_diff(&DiffPlan::default(), "a", "b").unwrap();
        let json = render_report_json(&run.report).unwrap();
        assert!(json.ends_with('\n'));
        let back: DiffReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, run.report);
    }
}
