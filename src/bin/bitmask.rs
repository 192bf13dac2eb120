use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use bitmask_codec::bridge::{convert_files, view_file};
use bitmask_codec::{CodecConfig, NumericKind, Result};

#[derive(Parser)]
#[command(name = "bitmask")]
#[command(about = "Converts numeric arrays between CSV, flat binary and bitmask-encoded binary")]
#[command(version)]
struct Cli {
    /// Files to convert. CSV files produce a binary file next to them;
    /// binary files are toggled in place.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Element kind CSV values are parsed as (int8..int64, float16..float64, or b/h/i/l/e/f/d)
    #[arg(short, long)]
    kind: Option<NumericKind>,

    /// Stop CSV conversion at the flat binary array
    #[arg(long)]
    no_encode: bool,

    /// Print the decoded values instead of converting
    #[arg(long)]
    view: bool,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose, config.log_level.as_deref());

    let failures = if cli.view {
        view_all(&cli.files, &config)
    } else {
        convert_all(&cli.files, &config)
    };

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Config file first, then command-line flags on top.
fn load_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    if let Some(kind) = cli.kind {
        config.csv_kind = kind;
    }
    if cli.no_encode {
        config.encode_csv = false;
    }
    Ok(config)
}

fn init_logging(verbose: u8, configured: Option<&str>) {
    let default_filter = match verbose {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

fn convert_all(files: &[PathBuf], config: &CodecConfig) -> usize {
    let mut failures = 0;
    for (path, result) in files.iter().zip(convert_files(files, config)) {
        match result {
            Ok(report) => println!(
                "{} {} -> {} ({} -> {} bytes, {})",
                "ok".green().bold(),
                report.source.display(),
                report.output.display(),
                report.input_size,
                report.output_size,
                report.to
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), path.display(), e);
            }
        }
    }
    failures
}

fn view_all(files: &[PathBuf], config: &CodecConfig) -> usize {
    let mut failures = 0;
    for path in files {
        match view_file(path, config) {
            Ok(seq) => {
                println!(
                    "{} ({}, {} values, {} non-zero)",
                    path.display().to_string().cyan(),
                    seq.kind(),
                    seq.len(),
                    seq.count_nonzero()
                );
                println!("{}", seq.values_to_strings().join(","));
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), path.display(), e);
            }
        }
    }
    failures
}
