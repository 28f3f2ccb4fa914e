//! Core engine: orchestrates line splitting + diffing + reporting, and renders
//! results for unified, side-by-side, JSON and plain-text export views.

mod export;
mod run;
mod side_by_side;
mod unified;

pub use export::{ExportLabels, render_export};
pub use run::{DiffError, DiffPlan, DiffRun, Side, render_report_json, run_diff};
pub use side_by_side::{SideBySideOptions, render_side_by_side};
pub use unified::{UnifiedOptions, render_unified};
