//! Fuzz target for the renderers: one output row per record, any width.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use linediff_core::{
    DiffPlan, SideBySideOptions, UnifiedOptions, render_side_by_side, render_unified, run_diff,
};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    original: String,
    modified: String,
    width: u8,
    line_numbers: bool,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(run) = run_diff(&DiffPlan::default(), &input.original, &input.modified) else {
        return;
    };
    let records = &run.report.records;

    let unified = render_unified(
        records,
        &UnifiedOptions {
            line_numbers: input.line_numbers,
        },
    );
    let sbs = render_side_by_side(
        records,
        &SideBySideOptions {
            width: usize::from(input.width),
        },
    );

    // Records never contain '\n', so rows map one-to-one onto records.
    assert_eq!(unified.matches('\n').count(), records.len());
    assert_eq!(sbs.matches('\n').count(), records.len());
});
