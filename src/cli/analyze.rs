//! Analyze command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::classify::ClassifyOptions;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::dataset::load_records;
use crate::domain::FlaggedPolicy;
use crate::render::{write_json_report, write_text_report};
use crate::stats::analyze_records;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file holding an array of records [default: dataset.json]
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to config file (moderation-dataset.toml or .yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the statistics as JSON to this path
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Omit the generation timestamp from the JSON report
    #[arg(long)]
    pub no_timestamp: bool,

    /// Count any non-null `flagged` value as its own category instead of only booleans
    #[arg(long)]
    pub any_flagged: bool,

    /// Characters of offending content shown in warnings
    #[arg(long, value_name = "N")]
    pub snippet_chars: Option<usize>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            input: args.input,
            report: args.report,
            snippet_chars: args.snippet_chars,
            flagged_policy: if args.any_flagged { Some(FlaggedPolicy::Any) } else { None },
            include_timestamp: if args.no_timestamp { Some(false) } else { None },
            ..CliOverrides::default()
        },
    );

    let records = load_records(&config.input)?;
    let options =
        ClassifyOptions { flagged_policy: config.flagged_policy, snippet_chars: config.snippet_chars };
    let stats = analyze_records(records, &options);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_text_report(&mut out, &stats)?;
    out.flush()?;

    if let Some(report_path) = &config.report {
        write_json_report(report_path, &config.input, &stats, config.include_timestamp)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        tracing::info!("Wrote JSON report to {}", report_path.display());
    }
    Ok(())
}
