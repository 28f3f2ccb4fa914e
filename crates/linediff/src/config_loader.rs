//! Configuration loading with include resolution.
//!
//! This module handles loading configuration files with support for:
//! - `includes` directive to compose configs from multiple files
//! - Circular include detection along the current include chain
//! - Merge semantics (later files override earlier ones field by field)

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use linediff_types::ConfigFile;

/// Maximum depth for include resolution to prevent excessive nesting.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Load a configuration file and everything it includes.
///
/// Includes are resolved relative to the including file, in order, and the
/// including file's own defaults are applied last.
pub fn load_config_with_includes(path: &Path) -> Result<ConfigFile> {
    let mut chain = HashSet::new();
    load_config_recursive(path, &mut chain, 0)
}

/// `chain` holds the files currently being resolved, so a file may be
/// included from several places as long as it never includes itself.
fn load_config_recursive(
    path: &Path,
    chain: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<ConfigFile> {
    if depth > MAX_INCLUDE_DEPTH {
        bail!(
            "Include depth exceeded maximum of {} levels at '{}'",
            MAX_INCLUDE_DEPTH,
            path.display()
        );
    }

    let canonical = path
        .canonicalize()
        .with_context(|| format!("canonicalize path '{}'", path.display()))?;

    if !chain.insert(canonical.clone()) {
        bail!("Circular include detected: '{}'", path.display());
    }

    let result = load_config_file(path, chain, depth);
    chain.remove(&canonical);
    result
}

fn load_config_file(
    path: &Path,
    chain: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<ConfigFile> {
    debug!("Loading config from '{}' (depth {})", path.display(), depth);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;

    let config: ConfigFile =
        toml::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))?;

    if config.includes.is_empty() {
        return Ok(config);
    }

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let mut merged = ConfigFile::default();

    for include_path in &config.includes {
        let full_path = base_dir.join(include_path);
        debug!(
            "Resolving include '{}' relative to '{}'",
            include_path,
            base_dir.display()
        );

        if !full_path.exists() {
            bail!(
                "Included config file not found: '{}' (resolved from '{}')",
                full_path.display(),
                include_path
            );
        }

        let included = load_config_recursive(&full_path, chain, depth + 1)?;
        merged = merge_configs(merged, included);
    }

    // The including file wins over everything it pulls in.
    Ok(merge_configs(
        merged,
        ConfigFile {
            includes: vec![],
            defaults: config.defaults,
        },
    ))
}

fn merge_configs(base: ConfigFile, other: ConfigFile) -> ConfigFile {
    ConfigFile {
        includes: vec![],
        defaults: base.defaults.merged_with(other.defaults),
    }
}
