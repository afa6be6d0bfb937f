//! Contract Diff CLI
//!
//! Compares two versions of an API contract specification and writes a
//! text, HTML or JSON report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use contract_diff::{
    compare_specs, load_spec, render_html, render_text, ReportOptions, Severity, SpecDiff,
};

#[derive(Parser)]
#[command(name = "contract-diff")]
#[command(about = "Compare two API contract specifications")]
#[command(version)]
struct Cli {
    /// The older version of the contract specification
    old: PathBuf,

    /// The newer version of the contract specification
    new: PathBuf,

    /// Report format
    #[arg(long, short, value_enum, default_value = "text")]
    format: Format,

    /// Output file (stdout if not specified)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Omit the auxiliary properties sections of enum constants
    #[arg(long)]
    hide_properties: bool,

    /// Omit the annotations sections of type elements
    #[arg(long)]
    hide_annotations: bool,

    /// Suppress warning diagnostics on stderr
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run(cli: &Cli) -> Result<(), u8> {
    let old = load_spec(&cli.old).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let new = load_spec(&cli.new).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let diff = compare_specs(&old, &new).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if !cli.quiet {
        report_diagnostics(&diff);
    }

    let options = ReportOptions {
        show_properties: !cli.hide_properties,
        show_annotations: !cli.hide_annotations,
    };

    let report = match cli.format {
        Format::Text => {
            let text = render_text(&diff, &options);
            if text.is_empty() {
                "No differences found.\n".to_string()
            } else {
                text
            }
        }
        Format::Html => render_html(&diff, &options),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&diff).map_err(|e| {
                eprintln!("Error serializing report: {}", e);
                2u8
            })?;
            json.push('\n');
            json
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &report).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            print!("{}", report);
        }
    }

    Ok(())
}

fn report_diagnostics(diff: &SpecDiff) {
    for diag in &diff.diagnostics {
        let level = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{}[{}]: {} - {}", level, diag.code, diag.path, diag.message);
    }
}
