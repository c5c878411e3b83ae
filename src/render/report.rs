//! Analysis reports: console text and JSON file.

use crate::domain::{VerdictKey, REPORT_SCHEMA_VERSION};
use crate::stats::DatasetStats;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::io::{self, Write};
use std::path::Path;

/// Write the human-readable analysis report.
pub fn write_text_report<W: Write>(out: &mut W, stats: &DatasetStats) -> io::Result<()> {
    if stats.is_empty() {
        writeln!(out, "No data entries found in the file.")?;
        return Ok(());
    }

    writeln!(out, "Found {} data entries.", stats.total_entries)?;
    writeln!(out)?;
    writeln!(out, "--- Analysis Results ---")?;

    writeln!(out)?;
    writeln!(out, "Flagged Status Statistics:")?;
    for key in [VerdictKey::Bool(true), VerdictKey::Bool(false)] {
        writeln!(
            out,
            "  {}: {} entries ({:.2}%)",
            key,
            stats.flagged.count(&key),
            stats.flagged.percentage(&key)
        )?;
    }
    for (key, count) in stats.flagged.by_count() {
        if matches!(key, VerdictKey::Other(_)) {
            writeln!(out, "  {}: {} entries ({:.2}%)", key, count, stats.flagged.percentage(key))?;
        }
    }
    if stats.flagged_excluded() > 0 {
        writeln!(
            out,
            "  (Note: {} entries were not included in Flagged statistics due to Assistant JSON parsing/format issues)",
            stats.flagged_excluded()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Language Distribution Statistics:")?;
    if stats.languages.is_empty() {
        writeln!(out, "  No language data processed.")?;
    } else {
        for (lang, count) in stats.languages.by_count() {
            writeln!(
                out,
                "  {}: {} entries ({:.2}%)",
                lang,
                count,
                stats.languages.percentage(lang)
            )?;
        }
    }
    if stats.language_excluded() > 0 {
        writeln!(
            out,
            "  (Note: {} entries were not included in language statistics due to 'text' field format issues)",
            stats.language_excluded()
        )?;
    }

    Ok(())
}

/// Structured form of the analysis, as written by [`write_json_report`].
pub fn report_value(source: &Path, stats: &DatasetStats, include_timestamp: bool) -> Value {
    let mut flagged_counts = Map::new();
    let mut flagged_percentages = Map::new();
    for (key, count) in stats.flagged.iter() {
        flagged_counts.insert(key.report_key(), json!(count));
        flagged_percentages.insert(key.report_key(), json!(round_percent(stats.flagged.percentage(key))));
    }

    let mut language_counts = Map::new();
    let mut language_percentages = Map::new();
    for (lang, count) in stats.languages.iter() {
        language_counts.insert(lang.to_string(), json!(count));
        language_percentages
            .insert(lang.to_string(), json!(round_percent(stats.languages.percentage(lang))));
    }

    let issues = stats
        .issues
        .iter()
        .map(|issue| {
            json!({
                "index": issue.index,
                "kind": issue.kind.code(),
                "message": issue.kind.to_string(),
                "snippet": issue.snippet,
            })
        })
        .collect::<Vec<_>>();

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("source".to_string(), Value::String(source.display().to_string()));
    report.insert("total_entries".to_string(), json!(stats.total_entries));
    report.insert(
        "flagged".to_string(),
        json!({
            "counts": flagged_counts,
            "percentages": flagged_percentages,
            "excluded": stats.flagged_excluded(),
        }),
    );
    report.insert(
        "languages".to_string(),
        json!({
            "counts": language_counts,
            "percentages": language_percentages,
            "excluded": stats.language_excluded(),
        }),
    );
    report.insert("issues".to_string(), Value::Array(issues));
    Value::Object(report)
}

/// Write the analysis as pretty JSON, creating parent directories.
pub fn write_json_report(
    report_path: &Path,
    source: &Path,
    stats: &DatasetStats,
    include_timestamp: bool,
) -> Result<()> {
    let report = report_value(source, stats, include_timestamp);
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifyOptions;
    use crate::domain::FlaggedPolicy;
    use crate::stats::analyze_records;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn render(stats: &DatasetStats) -> String {
        let mut out = Vec::new();
        write_text_report(&mut out, stats).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    fn sample_stats() -> DatasetStats {
        analyze_records(
            vec![
                json!({"text": "User: 안녕\n\nAssistant: {\"flagged\": true}"}),
                json!({"text": "User: hello\n\nAssistant: {\"flagged\": false}"}),
                json!({"text": "User: こんにちは\n\nAssistant: {\"flagged\": false}"}),
                json!({"text": "User: hi\n\nAssistant: not json"}),
                json!({"id": 9}),
            ],
            &ClassifyOptions::default(),
        )
    }

    #[test]
    fn text_report_matches_layout() {
        let expected = "\
Found 5 data entries.

--- Analysis Results ---

Flagged Status Statistics:
  Flagged (True): 1 entries (33.33%)
  Not Flagged (False): 2 entries (66.67%)
  (Note: 2 entries were not included in Flagged statistics due to Assistant JSON parsing/format issues)

Language Distribution Statistics:
  English: 2 entries (50.00%)
  Korean: 1 entries (25.00%)
  Japanese: 1 entries (25.00%)
  (Note: 1 entries were not included in language statistics due to 'text' field format issues)
";
        similar_asserts::assert_eq!(render(&sample_stats()).as_str(), expected);
    }

    #[test]
    fn text_report_for_empty_dataset() {
        assert_eq!(render(&DatasetStats::default()), "No data entries found in the file.\n");
    }

    #[test]
    fn text_report_without_language_data() {
        let stats = analyze_records(vec![json!({"text": ""})], &ClassifyOptions::default());
        let text = render(&stats);
        assert!(text.contains("  Flagged (True): 0 entries (0.00%)"));
        assert!(text.contains("  No language data processed."));
        assert!(text.contains("(Note: 1 entries were not included in language statistics"));
    }

    #[test]
    fn text_report_lists_other_verdicts_under_any_policy() {
        let opts = ClassifyOptions { flagged_policy: FlaggedPolicy::Any, ..Default::default() };
        let stats = analyze_records(
            vec![json!({"text": "User: a\n\nAssistant: {\"flagged\": \"maybe\"}"})],
            &opts,
        );
        let text = render(&stats);
        assert!(text.contains("  Flagged (\"maybe\"): 1 entries (100.00%)"));
        assert!(!text.contains("(Note:"));
    }

    #[test]
    fn json_report_omits_timestamp_when_disabled() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join("out").join("report.json");

        write_json_report(&report_path, Path::new("dataset.json"), &sample_stats(), false)
            .expect("write report");

        let content = fs::read_to_string(report_path).expect("read report");
        let parsed: Value = serde_json::from_str(&content).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["schema_version"], json!("1.0.0"));
        assert_eq!(parsed["total_entries"], json!(5));
        assert_eq!(parsed["flagged"]["counts"]["false"], json!(2));
        assert_eq!(parsed["flagged"]["percentages"]["true"], json!(33.33));
        assert_eq!(parsed["flagged"]["excluded"], json!(2));
        assert_eq!(parsed["languages"]["counts"]["English"], json!(2));
        assert_eq!(parsed["languages"]["excluded"], json!(1));
        assert_eq!(parsed["issues"][0]["index"], json!(4));
        assert_eq!(parsed["issues"][0]["kind"], json!("invalid_verdict_json"));
        assert_eq!(parsed["issues"][1]["kind"], json!("missing_text"));
    }

    #[test]
    fn json_report_includes_timestamp_by_default() {
        let report = report_value(Path::new("dataset.json"), &DatasetStats::default(), true);
        assert!(report["generated_at"].as_str().is_some_and(|s| s.ends_with("+00:00")));
        assert_eq!(report["source"], json!("dataset.json"));
    }
}
