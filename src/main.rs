//! Line Rules CLI - Command-line interface for rule-based line filtering
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates arguments to a report mode, configuration and input document
//! - Validates the mode before touching any file
//! - Handles process exit codes and terminal output

use clap::{Parser, ValueEnum};
use line_rules::config::find_config_file;
use line_rules::{
    LineRulesConfig, LineRulesResult, LineRulesRunner, OutputFormat, ReportMode, Rule,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Line Rules - annotate or filter text lines with built-in rules
#[derive(Parser)]
#[command(name = "line-rules")]
#[command(version)]
#[command(about = "Rule-based line filter and annotator for plain text files")]
#[command(long_about = "Line Rules evaluates a fixed set of line rules (FP001..FN203) against every line of a text file. 'annotate' prints the matching rule codes of each line; 'filter' prints the lines whose FP matches are at least as many as their FN matches.")]
struct Cli {
    /// Report mode: filter or annotate
    #[arg(required_unless_present = "list_rules")]
    mode: Option<String>,

    /// Text file to classify
    #[arg(required_unless_present = "list_rules")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormatArg,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Classify lines sequentially
    #[arg(long)]
    no_parallel: bool,

    /// List the active rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Text,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> LineRulesResult<i32> {
    if cli.list_rules {
        let config = load_config(cli.config.as_deref())?;
        return run_list_rules(&config, &mut io::stdout());
    }

    // Mode is validated before any configuration or input file is opened
    let mode: ReportMode = cli.mode.as_deref().unwrap_or_default().parse()?;
    let file = cli.file.unwrap_or_default();

    let config = load_config(cli.config.as_deref())?;
    run_report(config, mode, &file, cli.format.into(), cli.no_parallel, &mut io::stdout())
}

fn run_report<W: io::Write>(
    mut config: LineRulesConfig,
    mode: ReportMode,
    file: &Path,
    format: OutputFormat,
    no_parallel: bool,
    out: &mut W,
) -> LineRulesResult<i32> {
    if no_parallel {
        config.classifier.parallel = false;
    }

    let runner = LineRulesRunner::new_with_config(config)?;

    // The report is fully built before anything is printed
    let report = runner.run_with_format(mode, file, format)?;
    out.write_all(report.as_bytes())?;
    if format == OutputFormat::Json {
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(0)
}

fn run_list_rules<W: io::Write>(config: &LineRulesConfig, out: &mut W) -> LineRulesResult<i32> {
    let rules = config.rule_set()?;

    for rule in Rule::ALL {
        let status = if rules.get(rule.code()).is_some() { "enabled" } else { "disabled" };
        writeln!(
            out,
            "{} [{}] {} ({})",
            rule.code(),
            rule.family().as_str(),
            rule.description(),
            status
        )?;
    }

    Ok(0)
}

/// Explicit config path, else a default file in the working directory, else defaults
fn load_config(config_path: Option<&Path>) -> LineRulesResult<LineRulesConfig> {
    if let Some(path) = config_path {
        return LineRulesConfig::load_from_file(path);
    }

    match find_config_file(".") {
        Some(path) => LineRulesConfig::load_from_file(path),
        None => Ok(LineRulesConfig::default()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_report_command() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        fs::write(&input, "hello.\n\n").unwrap();

        let mut out = Vec::new();
        let code = run_report(
            LineRulesConfig::default(),
            ReportMode::Annotate,
            &input,
            OutputFormat::Text,
            true,
            &mut out,
        )
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "1: FP001 FP002\n2: FN202\n");
    }

    #[test]
    fn test_report_missing_file_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut out = Vec::new();

        let result = run_report(
            LineRulesConfig::default(),
            ReportMode::Filter,
            &temp_dir.path().join("missing.txt"),
            OutputFormat::Text,
            false,
            &mut out,
        );

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_rules() {
        let config = LineRulesConfig::load_from_str("rules:\n  disabled: [FN203]\n").unwrap();
        let mut out = Vec::new();

        assert_eq!(run_list_rules(&config, &mut out).unwrap(), 0);

        let listing = String::from_utf8(out).unwrap();
        assert_eq!(listing.lines().count(), 6);
        assert!(listing.contains("FP001 [positive] Line ends with '.' (enabled)"));
        assert!(listing.contains("FN203 [negative]"));
        assert!(listing.lines().last().unwrap().ends_with("(disabled)"));
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let cli = Cli::parse_from(["line-rules", "delete", "/nonexistent/input.txt"]);
        let err = run_command(cli).unwrap_err();

        assert!(matches!(err, line_rules::LineRulesError::InvalidArgument { .. }));
    }
}
