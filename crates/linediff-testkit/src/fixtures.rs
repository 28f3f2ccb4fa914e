//! Common test fixtures for linediff.
//!
//! Each sample pairs two inputs with the classification the default
//! (lookahead) engine produces for them.

use linediff_types::{ChangeKind, ConfigFile, Defaults, DiffRecord, OutputFormat};

/// A named input pair with its expected records.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: &'static str,
    pub original: &'static str,
    pub modified: &'static str,
    pub expected: Vec<DiffRecord>,
}

impl Sample {
    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.expected.iter().map(|r| r.kind).collect()
    }
}

/// Sample input pairs.
pub mod sample_texts {
    use super::*;

    pub const HELLO_ORIGINAL: &str =
        "function hello() {\n  console.log('Hello');\n  return true;\n}";

    pub const HELLO_MODIFIED: &str = "function hello() {\n  console.log('Hello World');\n  console.log('Modified');\n  return true;\n}";

    /// One line edited, one line inserted.
    pub fn hello() -> Sample {
        Sample {
            name: "hello",
            original: HELLO_ORIGINAL,
            modified: HELLO_MODIFIED,
            expected: vec![
                DiffRecord::unchanged("function hello() {", 1, 1),
                DiffRecord::modified(
                    "  console.log('Hello');",
                    "  console.log('Hello World');",
                    2,
                    2,
                ),
                DiffRecord::added("  console.log('Modified');", 3),
                DiffRecord::unchanged("  return true;", 3, 4),
                DiffRecord::unchanged("}", 4, 5),
            ],
        }
    }

    pub fn pure_insertion() -> Sample {
        Sample {
            name: "pure_insertion",
            original: "",
            modified: "x\ny",
            expected: vec![DiffRecord::added("x", 1), DiffRecord::added("y", 2)],
        }
    }

    pub fn pure_deletion() -> Sample {
        Sample {
            name: "pure_deletion",
            original: "x\ny",
            modified: "",
            expected: vec![DiffRecord::removed("x", 1), DiffRecord::removed("y", 2)],
        }
    }

    pub fn single_modification() -> Sample {
        Sample {
            name: "single_modification",
            original: "foo",
            modified: "bar",
            expected: vec![DiffRecord::modified("foo", "bar", 1, 1)],
        }
    }

    /// A config file where a setting moved between sections.
    pub fn moved_line() -> Sample {
        Sample {
            name: "moved_line",
            original: "[a]\nkey = 1\n[b]\n",
            modified: "[a]\n[b]\nkey = 1\n",
            expected: vec![
                DiffRecord::unchanged("[a]", 1, 1),
                DiffRecord::removed("key = 1", 2),
                DiffRecord::unchanged("[b]", 3, 2),
                DiffRecord::added("key = 1", 3),
            ],
        }
    }

    pub fn all() -> Vec<Sample> {
        vec![
            hello(),
            pure_insertion(),
            pure_deletion(),
            single_modification(),
            moved_line(),
        ]
    }
}

/// Sample configuration files.
pub mod sample_configs {
    use super::*;

    pub fn empty() -> ConfigFile {
        ConfigFile::default()
    }

    pub fn built_in() -> ConfigFile {
        ConfigFile::built_in()
    }

    /// Side-by-side output at a narrow width.
    pub fn side_by_side() -> ConfigFile {
        ConfigFile {
            includes: vec![],
            defaults: Defaults {
                format: Some(OutputFormat::SideBySide),
                width: Some(20),
                ..Defaults::default()
            },
        }
    }
}
