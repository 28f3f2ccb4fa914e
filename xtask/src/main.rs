use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemars::schema_for;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repo automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the "CI local" suite: fmt, clippy, test, then regenerate `schemas/`.
    Ci,

    /// Generate JSON Schemas for the config file and the JSON report into `schemas/`.
    Schema {
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,

        /// Fail if the files on disk differ from the derived schemas instead of writing them.
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::Schema { out_dir, check } => schema(out_dir, check),
    }
}

fn ci() -> Result<()> {
    run("cargo", &["fmt", "--check"])?;
    run(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run("cargo", &["test", "--workspace"])?;
    schema(PathBuf::from("schemas"), false)?;
    Ok(())
}

fn schema(out_dir: PathBuf, check: bool) -> Result<()> {
    let schemas = [
        (
            out_dir.join("linediff.config.schema.json"),
            pretty_json(&schema_for!(linediff_types::ConfigFile))?,
        ),
        (
            out_dir.join("linediff.report.schema.json"),
            pretty_json(&schema_for!(linediff_types::DiffReport))?,
        ),
    ];

    if check {
        for (path, expected) in &schemas {
            let on_disk = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
            if &on_disk != expected {
                bail!("{} is stale; run `cargo run -p xtask -- schema`", path.display());
            }
        }
        return Ok(());
    }

    std::fs::create_dir_all(&out_dir).context("create schema output dir")?;
    for (path, bytes) in &schemas {
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn pretty_json(value: &impl serde::Serialize) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).context("serialize json")?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn run(bin: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(bin)
        .args(args)
        .status()
        .with_context(|| format!("run {bin} {args:?}"))?;
    if !status.success() {
        bail!("command failed: {bin} {args:?}");
    }
    Ok(())
}
