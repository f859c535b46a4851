use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use log::{LevelFilter, debug};
use loxwire_core::{MessageSource, StreamSource};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("LOXWIRE_BUILD_COMMIT"),
    ", built ",
    env!("LOXWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "loxwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for recorded home-automation controller event streams.",
    long_about = None,
    after_help = "Examples:\n  loxwire capture decode stream.lxw -o report.json\n  loxwire capture dump stream.lxw --stdout --pretty\n  loxwire header 0302000018000000\n  loxwire uuid 3c2d1e0f5a4b78698796a5b4c3d2e1f0"
)]
struct Cli {
    /// Log decoder diagnostics (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on recorded event streams.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Decode a single 8-byte message header given as hex.
    Header {
        /// 16 hex digits, e.g. 0302000018000000
        hex: String,
    },
    /// Render 16 raw identifier bytes (32 hex digits) in canonical form.
    Uuid {
        hex: String,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a capture of header/payload frames into a JSON report.
    #[command(alias = "dump")]
    #[command(
        after_help = "Examples:\n  loxwire capture decode stream.lxw -o report.json\n  loxwire capture dump stream.lxw --stdout"
    )]
    Decode {
        /// Path to a capture file (raw header/payload frames)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if error-level issues are present
        #[arg(long)]
        strict: bool,

        /// List decoding issues after decoding
        #[arg(long)]
        list_issues: bool,

        /// Largest payload accepted per message, in bytes
        #[arg(long, default_value_t = loxwire_core::DEFAULT_MAX_PAYLOAD_LEN)]
        max_payload: usize,
    },
}

struct DecodeOptions {
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_issues: bool,
    max_payload: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = matches!(
        cli.command,
        Commands::Capture {
            command: CaptureCommands::Decode { quiet: true, .. }
        }
    );
    init_logging(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_issues,
                max_payload,
            } => cmd_capture_decode(
                input,
                DecodeOptions {
                    report,
                    stdout,
                    pretty,
                    compact,
                    quiet,
                    strict,
                    list_issues,
                    max_payload,
                },
            ),
        },
        Commands::Header { hex } => cmd_header(&hex),
        Commands::Uuid { hex } => cmd_uuid(&hex),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_capture_decode(input: PathBuf, opts: DecodeOptions) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if opts.stdout {
        None
    } else {
        Some(opts.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let source = StreamSource::open(&resolved_input)
        .with_context(|| format!("Failed to open capture: {}", resolved_input.display()))?
        .with_max_payload_len(opts.max_payload);
    debug!(
        "decoding {} (max payload {} bytes)",
        resolved_input.display(),
        source.max_payload_len()
    );
    let rep = decode(&resolved_input, source)?;
    let json = serialize_report(&rep, opts.pretty, opts.compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !opts.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if opts.list_issues && !opts.quiet {
        print_issues(&rep);
    }
    if opts.strict && loxwire_core::has_errors(&rep) {
        return Err(CliError::new(
            "error-level decoding issues detected",
            Some("use --list-issues to inspect".to_string()),
        ));
    }
    Ok(())
}

fn decode<S: MessageSource>(
    input: &PathBuf,
    source: S,
) -> Result<loxwire_core::Report, CliError> {
    loxwire_core::decode_source(input, source).map_err(|err| {
        CliError::new(
            format!("capture decoding failed: {err}"),
            Some("the capture must be a sequence of 8-byte headers and their payloads".to_string()),
        )
    })
}

fn ensure_distinct_output(report_path: &PathBuf, input_abs: &PathBuf) -> Result<(), CliError> {
    let report_dir = match report_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Some(Path::new(".")),
        // A directory that does not exist yet cannot hold the input.
        Some(parent) if !parent.exists() => return Ok(()),
        other => other,
    };
    let report_dir = report_dir
        .map(fs::canonicalize)
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    if let Some(report_dir) = report_dir {
        let report_target = report_dir.join(
            report_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
        );
        if &report_target == input_abs {
            return Err(CliError::new(
                format!(
                    "report path must differ from input: {}",
                    report_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn cmd_header(hex_text: &str) -> Result<(), CliError> {
    let bytes = parse_hex(hex_text, 8)?;
    let header = loxwire_core::decode_header(&bytes)
        .map_err(|err| CliError::new(err.to_string(), None))?;
    let json = serde_json::to_string_pretty(&header).context("JSON serialization failed")?;
    println!("{}", json);
    Ok(())
}

fn cmd_uuid(hex_text: &str) -> Result<(), CliError> {
    let bytes = parse_hex(hex_text, 16)?;
    let text = loxwire_core::try_format_uuid(&bytes)
        .map_err(|err| CliError::new(err.to_string(), None))?;
    println!("{}", text);
    Ok(())
}

fn parse_hex(text: &str, expected: usize) -> Result<Vec<u8>, CliError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    let bytes = hex::decode(&cleaned).map_err(|err| {
        CliError::new(
            format!("invalid hex input '{}'", text),
            Some(format!("hex error: {err}")),
        )
    })?;
    if bytes.len() != expected {
        return Err(CliError::new(
            format!("expected {} bytes, got {}", expected, bytes.len()),
            Some(format!("pass exactly {} hex digits", expected * 2)),
        ));
    }
    Ok(bytes)
}

fn serialize_report(
    rep: &loxwire_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_issues(rep: &loxwire_core::Report) {
    eprintln!("Decoding issues:");
    for issue in &rep.issues {
        eprintln!("  {} {} ({})", issue.severity, issue.id, issue.count);
        for example in &issue.examples {
            eprintln!("    {}", example);
        }
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a recorded capture file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a recorded capture file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
