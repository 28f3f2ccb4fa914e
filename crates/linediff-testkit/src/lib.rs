//! Shared test utilities for the linediff workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for generating texts and line sequences
//! - **fixtures**: Sample inputs with known diffs
//! - **invariants**: A checker for the structural rules every diff result obeys
//! - **schema**: JSON schema validators for DTOs
//!
//! # Example
//!
//! ```rust,ignore
//! use linediff_testkit::{arb, check_invariants};
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn diff_is_well_formed((a, b) in arb::arb_text_pair()) {
//!         let records = linediff_diff::compute_diff(&a, &b);
//!         prop_assert!(check_invariants(&records, &lines(&a), &lines(&b)).is_ok());
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;
pub mod invariants;
pub mod schema;

pub use arb::{arb_line, arb_lines, arb_text, arb_text_pair};
pub use invariants::{InvariantViolation, check_invariants};
pub use schema::{validate_config_file, validate_report};
