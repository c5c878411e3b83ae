//! Convert command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::dataset::load_records;
use crate::render::convert_records;

#[derive(Args)]
pub struct ConvertArgs {
    /// JSON file holding an array of records [default: dataset.json]
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// JSONL file to write [default: fine_tuning.jsonl]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to config file (moderation-dataset.toml or .yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Characters of offending content shown in warnings
    #[arg(long, value_name = "N")]
    pub snippet_chars: Option<usize>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            input: args.input,
            output: args.output,
            snippet_chars: args.snippet_chars,
            ..CliOverrides::default()
        },
    );

    // Load everything before touching the output so fatal errors leave no file behind.
    let records = load_records(&config.input)?;
    tracing::info!("Loaded {} records from {}", records.len(), config.input.display());

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create output file: {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);

    let summary = convert_records(records, &mut writer, config.snippet_chars)
        .with_context(|| format!("Failed writing {}", config.output.display()))?;

    if summary.skipped.is_empty() {
        println!("Converted {} records to {}", summary.written, config.output.display());
    } else {
        println!(
            "Converted {} records to {} (skipped {})",
            summary.written,
            config.output.display(),
            summary.skipped.len()
        );
    }
    Ok(())
}
