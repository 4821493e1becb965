//! Dictionary entries and immutable vocabulary snapshots.
//!
//! A [`DictionarySnapshot`] is built in one go from the entries a store
//! returns and is never modified afterwards. Consumers share it through an
//! `Arc`; a refresh builds a new snapshot and swaps the pointer.

use std::fmt;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::script::{Script, ScriptDetector};

/// Trust score at or above which an entry counts as high trust.
pub const HIGH_TRUST: u8 = 90;

/// Highest possible trust score.
pub const MAX_TRUST: u8 = 100;

fn default_script() -> Script {
    Script::Unknown
}

fn default_trust() -> u8 {
    MAX_TRUST
}

/// Part of speech recorded for a word, reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl Category {
    /// Name used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::Verb => "verb",
            Category::Adjective => "adjective",
            Category::Adverb => "adverb",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated vocabulary word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The word as stored.
    pub word: String,
    /// Script of the word. `Unknown` in a store record means "detect it".
    #[serde(default = "default_script", alias = "type")]
    pub script: Script,
    /// Quality rating, 0 to 100.
    #[serde(default = "default_trust", alias = "trustScore")]
    pub trust_score: u8,
    /// Optional part of speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Usage counter carried over from the store.
    #[serde(default)]
    pub frequency: u32,
}

impl DictionaryEntry {
    /// Create an entry with an explicit script and trust score.
    pub fn new<S: Into<String>>(word: S, script: Script, trust_score: u8) -> Self {
        DictionaryEntry {
            word: word.into(),
            script,
            trust_score: trust_score.min(MAX_TRUST),
            category: None,
            frequency: 0,
        }
    }

    /// Create a fully trusted entry whose script is detected on load.
    pub fn trusted<S: Into<String>>(word: S) -> Self {
        Self::new(word, Script::Unknown, MAX_TRUST)
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the frequency.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }
}

/// Summary counts of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryStats {
    /// Number of unique normalized words.
    pub total_words: usize,
    /// Latin entries.
    pub latin: usize,
    /// Cyrillic entries.
    pub cyrillic: usize,
    /// Mixed-script entries.
    pub mixed: usize,
    /// Entries with trust at or above [`HIGH_TRUST`].
    pub high_trust: usize,
    /// When the snapshot was loaded.
    pub loaded_at: DateTime<Utc>,
    /// Load sequence number of the snapshot.
    pub generation: u64,
}

/// An immutable, point-in-time copy of the vocabulary.
#[derive(Debug, Clone)]
pub struct DictionarySnapshot {
    /// Entries in descending trust order, store order within equal trust.
    entries: Vec<DictionaryEntry>,
    /// Normalized form of each entry, parallel to `entries`.
    keys: Vec<String>,
    /// Normalized word to position in `entries`.
    index: AHashMap<String, usize>,
    loaded_at: DateTime<Utc>,
    generation: u64,
}

impl DictionarySnapshot {
    /// Build a snapshot from store records.
    ///
    /// Records are ordered by descending trust (stable, so the store's order
    /// breaks ties); the first record for each normalized word wins, which is
    /// the highest-trust one. Records that normalize to nothing are dropped.
    /// Records without a script get one detected from the word itself.
    pub fn build(
        mut records: Vec<DictionaryEntry>,
        loaded_at: DateTime<Utc>,
        generation: u64,
    ) -> Self {
        records.sort_by(|a, b| b.trust_score.min(MAX_TRUST).cmp(&a.trust_score.min(MAX_TRUST)));

        let word_detector = ScriptDetector::with_thresholds(1, ScriptDetector::DEFAULT_DOMINANCE);
        let mut entries = Vec::with_capacity(records.len());
        let mut keys = Vec::with_capacity(records.len());
        let mut index = AHashMap::with_capacity(records.len());

        for mut record in records {
            let key = normalize(&record.word);
            if key.is_empty() || index.contains_key(&key) {
                continue;
            }

            record.trust_score = record.trust_score.min(MAX_TRUST);
            record.script = match record.script {
                Script::Unknown => match word_detector.detect(&record.word) {
                    Script::Unknown => Script::Mixed,
                    detected => detected,
                },
                known => known,
            };

            index.insert(key.clone(), entries.len());
            keys.push(key);
            entries.push(record);
        }

        DictionarySnapshot {
            entries,
            keys,
            index,
            loaded_at,
            generation,
        }
    }

    /// Build a snapshot of fully trusted words, mostly useful in tests.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = words.into_iter().map(DictionaryEntry::trusted).collect();
        Self::build(records, Utc::now(), 0)
    }

    /// Look up a normalized word.
    pub fn get(&self, normalized: &str) -> Option<&DictionaryEntry> {
        self.index.get(normalized).map(|&i| &self.entries[i])
    }

    /// Check whether a normalized word is in the vocabulary.
    pub fn contains(&self, normalized: &str) -> bool {
        self.index.contains_key(normalized)
    }

    /// Look up any spelling of a word, normalizing it first.
    pub fn lookup(&self, word: &str) -> Option<&DictionaryEntry> {
        self.get(&normalize(word))
    }

    /// Iterate over `(normalized, entry)` pairs in descending trust order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictionaryEntry)> {
        self.keys.iter().map(String::as_str).zip(self.entries.iter())
    }

    /// All entries in descending trust order.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Number of unique words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When this snapshot was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Load sequence number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Count entries per script and trust level.
    pub fn stats(&self) -> DictionaryStats {
        let mut stats = DictionaryStats {
            total_words: self.entries.len(),
            latin: 0,
            cyrillic: 0,
            mixed: 0,
            high_trust: 0,
            loaded_at: self.loaded_at,
            generation: self.generation,
        };

        for entry in &self.entries {
            match entry.script {
                Script::Latin => stats.latin += 1,
                Script::Cyrillic => stats.cyrillic += 1,
                Script::Mixed | Script::Unknown => stats.mixed += 1,
            }
            if entry.trust_score >= HIGH_TRUST {
                stats.high_trust += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = DictionarySnapshot::from_words(["salam", "Dúnya", "сәлем"]);

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.contains("salam"));
        assert!(snapshot.contains("dúnya"));
        assert!(!snapshot.contains("Dúnya"));
        assert_eq!(snapshot.lookup("DÚNYA!").map(|e| e.word.as_str()), Some("Dúnya"));
        assert!(snapshot.get("salm").is_none());
    }

    #[test]
    fn test_higher_trust_wins_on_duplicates() {
        let records = vec![
            DictionaryEntry::new("Kitap", Script::Latin, 40),
            DictionaryEntry::new("kitap", Script::Latin, 95),
            DictionaryEntry::new("KITAP", Script::Latin, 95),
        ];
        let snapshot = DictionarySnapshot::build(records, Utc::now(), 1);

        assert_eq!(snapshot.len(), 1);
        let entry = snapshot.get("kitap").unwrap();
        assert_eq!(entry.trust_score, 95);
        // Equal trust keeps the store's order.
        assert_eq!(entry.word, "kitap");
    }

    #[test]
    fn test_entries_sorted_by_trust() {
        let records = vec![
            DictionaryEntry::new("bir", Script::Latin, 10),
            DictionaryEntry::new("eki", Script::Latin, 80),
            DictionaryEntry::new("úsh", Script::Latin, 80),
            DictionaryEntry::new("tórt", Script::Latin, 100),
        ];
        let snapshot = DictionarySnapshot::build(records, Utc::now(), 1);
        let words: Vec<&str> = snapshot.iter().map(|(key, _)| key).collect();
        assert_eq!(words, vec!["tórt", "eki", "úsh", "bir"]);
    }

    #[test]
    fn test_script_detected_when_missing() {
        let snapshot = DictionarySnapshot::from_words(["qala", "қала", "ол", "x-й"]);
        assert_eq!(snapshot.get("qala").unwrap().script, Script::Latin);
        assert_eq!(snapshot.get("қала").unwrap().script, Script::Cyrillic);
        assert_eq!(snapshot.get("ол").unwrap().script, Script::Cyrillic);
        assert_eq!(snapshot.get("xй").unwrap().script, Script::Mixed);
    }

    #[test]
    fn test_blank_records_dropped_and_trust_clamped() {
        let records = vec![
            DictionaryEntry {
                word: "...".to_string(),
                script: Script::Latin,
                trust_score: 100,
                category: None,
                frequency: 0,
            },
            DictionaryEntry {
                word: "jaqsı".to_string(),
                script: Script::Latin,
                trust_score: 250,
                category: Some(Category::Adjective),
                frequency: 3,
            },
        ];
        let snapshot = DictionarySnapshot::build(records, Utc::now(), 7);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.generation(), 7);
        assert_eq!(snapshot.get("jaqsı").unwrap().trust_score, 100);
    }

    #[test]
    fn test_stats() {
        let records = vec![
            DictionaryEntry::new("salam", Script::Latin, 100),
            DictionaryEntry::new("сәлем", Script::Cyrillic, 85),
            DictionaryEntry::new("ok", Script::Mixed, 90),
        ];
        let snapshot = DictionarySnapshot::build(records, Utc::now(), 2);
        let stats = snapshot.stats();

        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.latin, 1);
        assert_eq!(stats.cyrillic, 1);
        assert_eq!(stats.mixed, 1);
        assert_eq!(stats.high_trust, 2);
        assert_eq!(stats.generation, 2);
    }

    #[test]
    fn test_entry_deserialize_store_record() {
        let json = r#"{"word": "Kitap", "type": "lotin", "trustScore": 80, "category": "noun"}"#;
        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.script, Script::Latin);
        assert_eq!(entry.trust_score, 80);
        assert_eq!(entry.category, Some(Category::Noun));

        let entry: DictionaryEntry = serde_json::from_str(r#"{"word": "qala"}"#).unwrap();
        assert_eq!(entry.script, Script::Unknown);
        assert_eq!(entry.trust_score, 100);
    }
}
