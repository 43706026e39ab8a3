//! CLI entry point for sqlgate.
//!
//! This module is thin: it handles argument parsing, I/O, logging setup and exit codes.
//! All business logic lives in the `sqlgate-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use sqlgate_app::{
    CheckInput, ExplainOutput, format_explanation, format_not_found, load_policy,
    parse_report_json, policy_summary, render_annotations, render_markdown, render_text,
    run_check, run_explain, serialize_report, verdict_exit_code,
};
use sqlgate_settings::Overrides;
use sqlgate_types::ids;
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "sqlgate.toml";
const LOG_ENV: &str = "SQLGATE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "sqlgate",
    version,
    about = "Admit only bounded, read-only, allowlisted SQL"
)]
struct Cli {
    /// Path to sqlgate config TOML (default: ./sqlgate.toml if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Override profile (analytics|strict).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the row-limit ceiling.
    #[arg(long, global = true)]
    max_row_limit: Option<u64>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one candidate query. Exit 0 when accepted, 2 when rejected.
    Check {
        /// Candidate SQL text.
        #[arg(long, conflicts_with = "file")]
        sql: Option<String>,

        /// Read the candidate from a file instead (default: stdin).
        #[arg(long)]
        file: Option<Utf8PathBuf>,

        /// Also write the JSON report here.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Output format on stdout.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the effective policy as JSON.
    Policy,

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a violation or advisory code with remediation guidance.
    Explain {
        /// The code to explain (e.g. "unlisted_table").
        code: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Markdown,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.cmd {
        Commands::Check {
            sql,
            file,
            report_out,
            format,
        } => cmd_check(&cli, sql.as_deref(), file.as_deref(), report_out.as_deref(), *format),
        Commands::Policy => cmd_policy(&cli),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { code } => cmd_explain(code),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(code = ids::CODE_RUNTIME_ERROR, "{err:#}");
            eprintln!("sqlgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        max_row_limit: cli.max_row_limit,
    }
}

/// An explicit `--config` must exist; the default path is optional.
fn read_config(cli: &Cli) -> anyhow::Result<String> {
    match &cli.config {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
        }
        None => {
            let path = Utf8Path::new(DEFAULT_CONFIG);
            if path.exists() {
                std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
            } else {
                tracing::debug!("no {DEFAULT_CONFIG} found, using defaults");
                Ok(String::new())
            }
        }
    }
}

fn read_candidate(sql: Option<&str>, file: Option<&Utf8Path>) -> anyhow::Result<String> {
    if let Some(sql) = sql {
        return Ok(sql.to_string());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path).with_context(|| format!("read sql: {path}"));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read sql from stdin")?;
    Ok(buf)
}

fn cmd_check(
    cli: &Cli,
    sql: Option<&str>,
    file: Option<&Utf8Path>,
    report_out: Option<&Utf8Path>,
    format: OutputFormat,
) -> anyhow::Result<i32> {
    let config_text = read_config(cli)?;
    let candidate = read_candidate(sql, file)?;

    let output = run_check(CheckInput {
        sql: &candidate,
        config_text: &config_text,
        overrides: overrides(cli),
    })?;

    if let Some(path) = report_out {
        let data = serialize_report(&output.report)?;
        write_file(path, &data).context("write report json")?;
    }

    match format {
        OutputFormat::Json => {
            let data = serialize_report(&output.report)?;
            println!("{}", String::from_utf8_lossy(&data));
        }
        OutputFormat::Text => print!("{}", render_text(&output.report)),
        OutputFormat::Markdown => print!("{}", render_markdown(&output.report)),
    }

    Ok(verdict_exit_code(&output.report.verdict))
}

fn cmd_policy(cli: &Cli) -> anyhow::Result<i32> {
    let resolved = load_policy(&read_config(cli)?, overrides(cli))?;
    let summary = policy_summary(&resolved);
    let json = serde_json::to_string_pretty(&summary).context("serialize policy")?;
    println!("{json}");
    Ok(0)
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<sqlgate_types::GateReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let md = render_markdown(&read_report(report_path)?);

    if let Some(out_path) = output {
        write_file(out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(0)
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<i32> {
    for annotation in render_annotations(&read_report(report_path)?, max) {
        println!("{annotation}");
    }
    Ok(0)
}

fn cmd_explain(code: &str) -> anyhow::Result<i32> {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            violation_codes,
            advisory_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, violation_codes, advisory_codes)
            );
            Ok(1)
        }
    }
}
