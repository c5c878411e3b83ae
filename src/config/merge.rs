//! Merge CLI overrides onto a loaded config.

use crate::domain::{Config, FlaggedPolicy};
use std::path::PathBuf;

/// Values given on the command line. `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub snippet_chars: Option<usize>,
    pub flagged_policy: Option<FlaggedPolicy>,
    pub include_timestamp: Option<bool>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(report) = cli.report {
        config.report = Some(report);
    }
    if let Some(snippet_chars) = cli.snippet_chars {
        config.snippet_chars = snippet_chars;
    }
    if let Some(policy) = cli.flagged_policy {
        config.flagged_policy = policy;
    }
    if let Some(include_timestamp) = cli.include_timestamp {
        config.include_timestamp = include_timestamp;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_win_over_file_values() {
        let file = Config {
            input: PathBuf::from("from_file.json"),
            snippet_chars: 10,
            ..Config::default()
        };
        let merged = merge_cli_with_config(
            file,
            CliOverrides {
                input: Some(PathBuf::from("from_cli.json")),
                flagged_policy: Some(FlaggedPolicy::Any),
                include_timestamp: Some(false),
                ..CliOverrides::default()
            },
        );
        assert_eq!(merged.input, PathBuf::from("from_cli.json"));
        assert_eq!(merged.snippet_chars, 10);
        assert_eq!(merged.flagged_policy, FlaggedPolicy::Any);
        assert!(!merged.include_timestamp);
    }

    #[test]
    fn empty_overrides_keep_config() {
        let merged = merge_cli_with_config(Config::default(), CliOverrides::default());
        assert_eq!(merged, Config::default());
    }
}
