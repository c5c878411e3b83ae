//! Dataset statistics
//!
//! One forward pass over the records fills two independent frequency
//! tables. A record can land in one table and be excluded from the other.

use crate::classify::{classify_record, ClassifyOptions};
use crate::domain::{json_type_name, IssueKind, Language, RawRecord, RecordIssue, VerdictKey};
use crate::utils::snippet;
use serde_json::Value;
use std::collections::BTreeMap;

/// Counts per distinct key, with percentages over the table's own total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self { counts: BTreeMap::new() }
    }
}

impl<K: Ord> FrequencyTable<K> {
    pub fn record(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Share of `key` in percent; 0 when the table is empty.
    pub fn percentage(&self, key: &K) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(key) as f64 / total as f64 * 100.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Entries ordered by count descending, ties by key.
    pub fn by_count(&self) -> Vec<(&K, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Result of analyzing a whole dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStats {
    pub total_entries: usize,
    pub flagged: FrequencyTable<VerdictKey>,
    pub languages: FrequencyTable<Language>,
    pub issues: Vec<RecordIssue>,
}

impl DatasetStats {
    /// Entries that produced no verdict.
    pub fn flagged_excluded(&self) -> usize {
        self.total_entries - self.flagged.total()
    }

    /// Entries that produced no language tag.
    pub fn language_excluded(&self) -> usize {
        self.total_entries - self.languages.total()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }
}

/// Classify every record and accumulate both tables.
///
/// Issues are logged at WARN as they are found and kept on the result.
pub fn analyze_records<I>(records: I, options: &ClassifyOptions) -> DatasetStats
where
    I: IntoIterator<Item = Value>,
{
    let mut stats = DatasetStats::default();

    for (i, value) in records.into_iter().enumerate() {
        let index = i + 1;
        stats.total_entries += 1;

        let record = match RawRecord::from_value(value) {
            Ok(record) => record,
            Err(other) => {
                let issue = RecordIssue {
                    index,
                    kind: IssueKind::NotAnObject(json_type_name(&other)),
                    snippet: snippet(&other.to_string(), options.snippet_chars),
                };
                tracing::warn!("{}", issue);
                stats.issues.push(issue);
                continue;
            }
        };

        let classification = classify_record(index, &record, options);
        for issue in classification.issues {
            tracing::warn!("{}", issue);
            stats.issues.push(issue);
        }
        if let Some(verdict) = classification.verdict {
            stats.flagged.record(verdict);
        }
        if let Some(language) = classification.language {
            stats.languages.record(language);
        }
    }

    tracing::debug!(
        "Analyzed {} entries: {} verdicts, {} languages, {} issues",
        stats.total_entries,
        stats.flagged.total(),
        stats.languages.total(),
        stats.issues.len()
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlaggedPolicy;
    use serde_json::json;

    fn analyze(records: Vec<Value>) -> DatasetStats {
        analyze_records(records, &ClassifyOptions::default())
    }

    #[test]
    fn korean_flagged_example() {
        let stats = analyze(vec![json!({"text": "User: 안녕\n\nAssistant: {\"flagged\": true}"})]);
        assert_eq!(stats.flagged.count(&VerdictKey::Bool(true)), 1);
        assert_eq!(stats.flagged.percentage(&VerdictKey::Bool(true)), 100.0);
        assert_eq!(stats.languages.count(&Language::Korean), 1);
        assert_eq!(stats.languages.percentage(&Language::Korean), 100.0);
        assert!(stats.issues.is_empty());
    }

    #[test]
    fn unparseable_assistant_is_excluded_from_flagged_only() {
        let stats = analyze(vec![json!({"text": "User: hello\n\nAssistant: not json"})]);
        assert!(stats.flagged.is_empty());
        assert_eq!(stats.flagged_excluded(), 1);
        assert_eq!(stats.languages.count(&Language::English), 1);
        assert_eq!(stats.language_excluded(), 0);
    }

    #[test]
    fn empty_input_aggregates_nothing() {
        let stats = analyze(Vec::new());
        assert!(stats.is_empty());
        assert_eq!(stats.flagged_excluded(), 0);
        assert_eq!(stats.flagged.percentage(&VerdictKey::Bool(true)), 0.0);
    }

    #[test]
    fn counts_plus_exclusions_equal_total() {
        let stats = analyze(vec![
            json!({"text": "User: a\n\nAssistant: {\"flagged\": true}"}),
            json!({"text": "User: b\n\nAssistant: {\"flagged\": false}"}),
            json!({"text": "User: こんにちは\n\nAssistant: {\"flagged\": false}"}),
            json!({"text": "no delimiter here"}),
            json!({"text": "User: c\n\nAssistant: {\"other\": 1}"}),
            json!({"text": ""}),
            json!({"meta": 1}),
            json!("not an object"),
            json!({"text": "User: d\n\nAssistant: {\"flagged\": \"maybe\"}"}),
        ]);
        assert_eq!(stats.total_entries, 9);
        assert_eq!(stats.flagged.total() + stats.flagged_excluded(), 9);
        assert_eq!(stats.languages.total() + stats.language_excluded(), 9);
        assert_eq!(stats.flagged.total(), 3);
        assert_eq!(stats.languages.total(), 6);
        assert_eq!(stats.languages.count(&Language::Japanese), 1);
    }

    #[test]
    fn missing_delimiter_never_counts_as_verdict() {
        let stats = analyze(vec![json!({"text": "User: 안녕 {\"flagged\": true}"})]);
        assert!(stats.flagged.is_empty());
        assert_eq!(stats.languages.count(&Language::Korean), 1);
        assert_eq!(stats.issues[0].kind, IssueKind::UnexpectedFormat);
    }

    #[test]
    fn non_object_entries_are_reported() {
        let stats = analyze(vec![json!(5)]);
        assert_eq!(stats.issues[0].kind, IssueKind::NotAnObject("number"));
        assert_eq!(stats.language_excluded(), 1);
    }

    #[test]
    fn any_policy_counts_non_boolean_values() {
        let opts = ClassifyOptions { flagged_policy: FlaggedPolicy::Any, ..Default::default() };
        let stats = analyze_records(
            vec![
                json!({"text": "User: a\n\nAssistant: {\"flagged\": \"maybe\"}"}),
                json!({"text": "User: b\n\nAssistant: {\"flagged\": \"maybe\"}"}),
                json!({"text": "User: c\n\nAssistant: {\"flagged\": true}"}),
            ],
            &opts,
        );
        assert_eq!(stats.flagged.count(&VerdictKey::Other("\"maybe\"".into())), 2);
        assert_eq!(stats.flagged.total(), 3);
        assert!(stats.issues.is_empty());
    }

    #[test]
    fn by_count_orders_descending_then_by_key() {
        let mut table = FrequencyTable::default();
        for lang in [Language::English, Language::Korean, Language::Korean, Language::Japanese] {
            table.record(lang);
        }
        let ordered: Vec<_> = table.by_count().into_iter().map(|(k, c)| (*k, c)).collect();
        assert_eq!(
            ordered,
            vec![(Language::Korean, 2), (Language::Japanese, 1), (Language::English, 1)]
        );
    }
}
