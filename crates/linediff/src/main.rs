use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use linediff_core::{
    DiffPlan, ExportLabels, SideBySideOptions, UnifiedOptions, render_export,
    render_report_json, render_side_by_side, render_unified, run_diff,
};
use linediff_types::{
    Algorithm, ConfigFile, Defaults, DiffOptions, OutputFormat, TrailingNewline,
};

mod config_loader;

use config_loader::load_config_with_includes;

const DEFAULT_CONFIG: &str = "linediff.toml";

/// Exit code when `--exit-code` is set and the inputs differ.
const EXIT_DIFFERENT: i32 = 2;

#[derive(Parser)]
#[command(name = "linediff")]
#[command(about = "Line-level text diff", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two files line by line.
    Diff(DiffArgs),

    /// Write both full texts into one plain-text document.
    Export(ExportArgs),

    /// Initialize a new linediff.toml configuration file.
    Init(InitArgs),

    /// Print the effective configuration (built-in defaults + config file).
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// The "before" file, or '-' for stdin.
    original: PathBuf,

    /// The "after" file, or '-' for stdin.
    modified: PathBuf,

    /// Path to a config file. If omitted, uses ./linediff.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diff engine.
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Exchange the two inputs before diffing.
    #[arg(long)]
    swap: bool,

    /// Show line numbers in unified output.
    #[arg(long, overrides_with = "no_line_numbers")]
    line_numbers: bool,

    /// Hide line numbers even when the config enables them.
    #[arg(long, overrides_with = "line_numbers")]
    no_line_numbers: bool,

    /// Pane width for side-by-side output.
    #[arg(long)]
    width: Option<usize>,

    /// Treat the empty segment after a final newline as a line.
    #[arg(long, overrides_with = "drop_trailing_newline")]
    keep_trailing_newline: bool,

    /// Ignore the empty segment after a final newline.
    #[arg(long, overrides_with = "keep_trailing_newline")]
    drop_trailing_newline: bool,

    /// Compare carriage returns at line ends instead of stripping them.
    #[arg(long, overrides_with = "strip_cr")]
    keep_cr: bool,

    /// Strip one carriage return at each line end before comparing.
    #[arg(long, overrides_with = "keep_cr")]
    strip_cr: bool,

    /// Refuse inputs with more lines than this on either side.
    #[arg(long)]
    max_lines: Option<usize>,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Exit with status 2 when the inputs differ.
    #[arg(long)]
    exit_code: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// The "before" file, or '-' for stdin.
    original: PathBuf,

    /// The "after" file, or '-' for stdin.
    modified: PathBuf,

    /// Write the document to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Heading for the original section (defaults to the path).
    #[arg(long)]
    original_label: Option<String>,

    /// Heading for the modified section (defaults to the path).
    #[arg(long)]
    modified_label: Option<String>,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Where to write the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    output: PathBuf,

    /// Overwrite an existing file without asking.
    #[arg(long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Path to a config file. If omitted, uses ./linediff.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    format: ConfigFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigFormat {
    Toml,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Lookahead,
    Myers,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(v: AlgorithmArg) -> Self {
        match v {
            AlgorithmArg::Lookahead => Algorithm::Lookahead,
            AlgorithmArg::Myers => Algorithm::Myers,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Unified,
    SideBySide,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Unified => OutputFormat::Unified,
            FormatArg::SideBySide => OutputFormat::SideBySide,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(not(test))]
fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Diff(args) => cmd_diff(args),
        Commands::Export(args) => {
            cmd_export(args)?;
            Ok(0)
        }
        Commands::Init(args) => {
            cmd_init(args)?;
            Ok(0)
        }
        Commands::Config(args) => {
            cmd_config(args)?;
            Ok(0)
        }
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

/// Everything `diff` needs after flags, config and built-ins are layered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    plan: DiffPlan,
    format: OutputFormat,
    line_numbers: bool,
    width: usize,
}

/// Layer CLI flags over config defaults over built-in defaults.
fn resolve(args: &DiffArgs, defaults: &Defaults) -> Resolved {
    let built_in = ConfigFile::built_in().defaults;
    let d = built_in.merged_with(defaults.clone());

    let trailing_newline = match switch(args.keep_trailing_newline, args.drop_trailing_newline) {
        Some(true) => TrailingNewline::Keep,
        Some(false) => TrailingNewline::Drop,
        None => d.trailing_newline.unwrap_or_default(),
    };

    let options = DiffOptions {
        algorithm: args
            .algorithm
            .map(Algorithm::from)
            .or(d.algorithm)
            .unwrap_or_default(),
        trailing_newline,
        normalize_crlf: switch(args.strip_cr, args.keep_cr)
            .or(d.normalize_crlf)
            .unwrap_or(true),
    };

    Resolved {
        plan: DiffPlan {
            options,
            swap: args.swap,
            max_lines: args.max_lines.or(d.max_lines),
        },
        format: args.format.map(OutputFormat::from).or(d.format).unwrap_or_default(),
        line_numbers: switch(args.line_numbers, args.no_line_numbers)
            .or(d.line_numbers)
            .unwrap_or(false),
        width: args
            .width
            .or(d.width)
            .unwrap_or(SideBySideOptions::default().width),
    }
}

/// An on/off flag pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

fn cmd_diff(args: DiffArgs) -> Result<i32> {
    info!("Starting diff");

    let cfg = load_config(args.config.clone())?;
    let resolved = resolve(&args, &cfg.defaults);
    debug!(
        "Resolved plan: algorithm={}, format={}, swap={}, max_lines={:?}",
        resolved.plan.options.algorithm.as_str(),
        resolved.format.as_str(),
        resolved.plan.swap,
        resolved.plan.max_lines
    );

    let (original, modified) = read_inputs(&args.original, &args.modified)?;

    let run = run_diff(&resolved.plan, &original, &modified)?;
    let stats = &run.report.stats;
    info!(
        "{} unchanged, {} added, {} removed, {} modified",
        stats.unchanged, stats.added, stats.removed, stats.modified
    );

    let rendered = match resolved.format {
        OutputFormat::Unified => render_unified(
            &run.report.records,
            &UnifiedOptions {
                line_numbers: resolved.line_numbers,
            },
        ),
        OutputFormat::SideBySide => render_side_by_side(
            &run.report.records,
            &SideBySideOptions {
                width: resolved.width,
            },
        ),
        OutputFormat::Json => render_report_json(&run.report).context("render json")?,
    };

    emit(args.out.as_deref(), &rendered)?;

    if args.exit_code && run.has_changes() {
        Ok(EXIT_DIFFERENT)
    } else {
        Ok(0)
    }
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let (original, modified) = read_inputs(&args.original, &args.modified)?;

    let labels = ExportLabels {
        original: args
            .original_label
            .unwrap_or_else(|| input_label(&args.original)),
        modified: args
            .modified_label
            .unwrap_or_else(|| input_label(&args.modified)),
    };

    let doc = render_export(&original, &modified, &labels);
    emit(args.out.as_deref(), &doc)
}

fn input_label(path: &Path) -> String {
    if is_stdin(path) {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

fn confirm_overwrite<R: BufRead, W: Write>(
    input: &mut R,
    mut err: W,
    output_path: &Path,
) -> Result<bool> {
    write!(
        err,
        "Configuration file '{}' already exists. Overwrite? [y/N] ",
        output_path.display()
    )
    .context("write prompt")?;
    err.flush().context("flush stderr")?;

    let mut input_line = String::new();
    input.read_line(&mut input_line).context("read stdin")?;

    let input = input_line.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

fn cmd_init(args: InitArgs) -> Result<()> {
    let mut input = io::stdin().lock();
    cmd_init_with_io(args, &mut input, io::stderr())
}

fn cmd_init_with_io<R: BufRead, W: Write>(args: InitArgs, input: &mut R, err: W) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force && !confirm_overwrite(input, err, output_path)? {
        println!("Aborted.");
        return Ok(());
    }

    let body = toml::to_string_pretty(&ConfigFile::built_in()).context("render toml")?;
    let content = format!(
        "# linediff configuration.\n\
         # Every field is optional; command-line flags take precedence.\n\
         # algorithm: lookahead | myers\n\
         # trailing_newline: drop | keep\n\
         # format: unified | side_by_side | json\n\n{body}"
    );

    write_text(output_path, &content)?;
    println!("Created {}.", output_path.display());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let cfg = load_config(args.config)?;
    let effective = ConfigFile {
        includes: vec![],
        defaults: ConfigFile::built_in().defaults.merged_with(cfg.defaults),
    };

    match args.format {
        ConfigFormat::Toml => {
            let s = toml::to_string_pretty(&effective).context("render toml")?;
            print!("{s}");
        }
        ConfigFormat::Json => {
            let s = serde_json::to_string_pretty(&effective).context("render json")?;
            println!("{s}");
        }
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ConfigFile> {
    let user_path = path.or_else(|| {
        let p = PathBuf::from(DEFAULT_CONFIG);
        if p.exists() { Some(p) } else { None }
    });

    let Some(path) = user_path else {
        debug!("No config file found, using built-in defaults");
        return Ok(ConfigFile::default());
    };

    info!("Loading config from: {}", path.display());
    load_config_with_includes(&path)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_inputs(original: &Path, modified: &Path) -> Result<(String, String)> {
    if is_stdin(original) && is_stdin(modified) {
        bail!("only one input can be read from stdin");
    }
    Ok((read_input(original)?, read_input(modified)?))
}

/// Read one input. Bytes that are not UTF-8 become U+FFFD, so binary and
/// legacy-encoded files still diff line by line.
fn read_input(path: &Path) -> Result<String> {
    let bytes = if is_stdin(path) {
        info!("Reading input from stdin");
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("read input from stdin")?;
        buf
    } else {
        debug!("Reading input from: {}", path.display());
        std::fs::read(path).with_context(|| format!("read {}", path.display()))?
    };

    Ok(decode_lossy(bytes))
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            debug!("Input is not valid UTF-8, replacing invalid sequences");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            info!("Writing output to: {}", path.display());
            write_text(path, text)
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn diff_args(extra: &[&str]) -> DiffArgs {
        let mut argv = vec!["linediff", "diff", "a.txt", "b.txt"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Diff(args) => args,
            _ => unreachable!("parsed a diff command"),
        }
    }

    #[test]
    fn resolve_uses_built_ins_without_config() {
        let r = resolve(&diff_args(&[]), &Defaults::default());
        assert_eq!(r.plan.options, DiffOptions::default());
        assert_eq!(r.format, OutputFormat::Unified);
        assert_eq!(r.width, 60);
        assert_eq!(r.plan.max_lines, Some(50_000));
        assert!(!r.line_numbers);
    }

    #[test]
    fn resolve_prefers_flags_over_config() {
        let defaults = Defaults {
            algorithm: Some(Algorithm::Lookahead),
            format: Some(OutputFormat::Json),
            width: Some(20),
            ..Defaults::default()
        };
        let args = diff_args(&["--algorithm", "myers", "--width", "33", "--swap"]);
        let r = resolve(&args, &defaults);
        assert_eq!(r.plan.options.algorithm, Algorithm::Myers);
        assert_eq!(r.format, OutputFormat::Json);
        assert_eq!(r.width, 33);
        assert!(r.plan.swap);
    }

    #[test]
    fn resolve_line_policy_flags() {
        let defaults = Defaults {
            trailing_newline: Some(TrailingNewline::Drop),
            normalize_crlf: Some(true),
            ..Defaults::default()
        };
        let r = resolve(
            &diff_args(&["--keep-trailing-newline", "--keep-cr"]),
            &defaults,
        );
        assert_eq!(r.plan.options.trailing_newline, TrailingNewline::Keep);
        assert!(!r.plan.options.normalize_crlf);
    }

    #[test]
    fn negating_flags_override_config() {
        let defaults = Defaults {
            trailing_newline: Some(TrailingNewline::Keep),
            normalize_crlf: Some(false),
            line_numbers: Some(true),
            ..Defaults::default()
        };
        let r = resolve(
            &diff_args(&["--drop-trailing-newline", "--strip-cr", "--no-line-numbers"]),
            &defaults,
        );
        assert_eq!(r.plan.options.trailing_newline, TrailingNewline::Drop);
        assert!(r.plan.options.normalize_crlf);
        assert!(!r.line_numbers);

        let r = resolve(&diff_args(&[]), &defaults);
        assert_eq!(r.plan.options.trailing_newline, TrailingNewline::Keep);
        assert!(!r.plan.options.normalize_crlf);
        assert!(r.line_numbers);
    }

    #[test]
    fn last_of_a_flag_pair_wins() {
        let r = resolve(
            &diff_args(&["--line-numbers", "--no-line-numbers"]),
            &Defaults::default(),
        );
        assert!(!r.line_numbers);

        let r = resolve(
            &diff_args(&["--no-line-numbers", "--line-numbers"]),
            &Defaults::default(),
        );
        assert!(r.line_numbers);
    }

    #[test]
    fn confirm_overwrite_parses_input() {
        let mut yes = std::io::Cursor::new("yes\n");
        let mut sink = Vec::new();
        assert!(confirm_overwrite(&mut yes, &mut sink, Path::new("linediff.toml")).unwrap());

        let mut no = std::io::Cursor::new("\n");
        assert!(!confirm_overwrite(&mut no, &mut sink, Path::new("linediff.toml")).unwrap());
        assert!(String::from_utf8(sink).unwrap().contains("already exists"));
    }

    #[test]
    fn cmd_init_with_io_force_writes_file() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("nested/linediff.toml");
        let args = InitArgs {
            output: output_path.clone(),
            force: true,
        };

        let mut input = std::io::Cursor::new("");
        let mut err = Vec::new();
        cmd_init_with_io(args, &mut input, &mut err).expect("init with force");

        let text = std::fs::read_to_string(&output_path).unwrap();
        let parsed: ConfigFile = toml::from_str(&text).expect("generated config parses");
        assert_eq!(parsed, ConfigFile::built_in());
    }

    #[test]
    fn cmd_init_with_io_keeps_file_when_declined() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("linediff.toml");
        std::fs::write(&output_path, "# mine\n").unwrap();
        let args = InitArgs {
            output: output_path.clone(),
            force: false,
        };

        let mut input = std::io::Cursor::new("n\n");
        let mut err = Vec::new();
        cmd_init_with_io(args, &mut input, &mut err).unwrap();
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "# mine\n");
    }

    #[test]
    fn both_inputs_from_stdin_is_rejected() {
        let err = read_inputs(Path::new("-"), Path::new("-")).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn decode_lossy_keeps_valid_text_and_replaces_invalid_bytes() {
        assert_eq!(decode_lossy(b"plain\n".to_vec()), "plain\n");
        assert_eq!(decode_lossy(b"caf\xe9\n".to_vec()), "caf\u{FFFD}\n");
    }

    #[test]
    fn run_with_args_writes_diff_to_file() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let out = dir.path().join("out/diff.txt");
        std::fs::write(&a, "x\ny\n").unwrap();
        std::fs::write(&b, "x\nz\n").unwrap();

        let argv: Vec<std::ffi::OsString> = vec![
            "linediff".into(),
            "diff".into(),
            a.into_os_string(),
            b.into_os_string(),
            "--out".into(),
            out.clone().into_os_string(),
            "--exit-code".into(),
        ];
        let code = run_with_args(argv).unwrap();
        assert_eq!(code, EXIT_DIFFERENT);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "  x\n~ y → z\n");
    }
}
