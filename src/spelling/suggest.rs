//! Spelling suggestion generation algorithms.
//!
//! Suggestions come from a two-phase scan over the snapshot, restricted to
//! entries of the misspelled word's script:
//!
//! 1. a substring phase, where a dictionary word containing the word (or
//!    contained in it) is accepted as is, highest trust first;
//! 2. an edit distance phase, run only when the first phase left room, that
//!    keeps every word within the distance budget, closest first.

use std::cmp::Ordering;
use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::script::Script;
use crate::spelling::dictionary::{DictionaryEntry, DictionarySnapshot};
use crate::spelling::levenshtein::distance_within;

/// How a suggestion was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// One word contains the other.
    Substring,
    /// Within the edit distance budget.
    EditDistance,
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionKind::Substring => write!(f, "substring"),
            SuggestionKind::EditDistance => write!(f, "edit distance"),
        }
    }
}

/// A spelling suggestion with a score indicating confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word, as stored in the dictionary.
    pub word: String,
    /// Edit distance from the original word; 0 for substring matches.
    pub distance: u32,
    /// Confidence score, 0 to 100.
    pub confidence: u8,
    /// Trust score of the suggested entry.
    pub trust_score: u8,
    /// Which phase produced the suggestion.
    pub kind: SuggestionKind,
}

impl Suggestion {
    /// A suggestion from the substring phase.
    pub fn substring(entry: &DictionaryEntry, confidence: u8) -> Self {
        Suggestion {
            word: entry.word.clone(),
            distance: 0,
            confidence,
            trust_score: entry.trust_score,
            kind: SuggestionKind::Substring,
        }
    }

    /// A suggestion from the edit distance phase.
    pub fn edit_distance(entry: &DictionaryEntry, distance: u32) -> Self {
        Suggestion {
            word: entry.word.clone(),
            distance,
            confidence: confidence_for_distance(distance),
            trust_score: entry.trust_score,
            kind: SuggestionKind::EditDistance,
        }
    }

    /// Ordering of the edit distance phase: ascending distance, then
    /// descending confidence, descending trust and finally the word.
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.confidence.cmp(&self.confidence))
            .then_with(|| other.trust_score.cmp(&self.trust_score))
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Confidence of an edit distance match: `max(0, 100 - 25 * distance)`.
pub fn confidence_for_distance(distance: u32) -> u8 {
    100u32.saturating_sub(distance.saturating_mul(25)) as u8
}

/// Configuration for spelling suggestion generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum edit distance to consider.
    pub max_distance: u32,
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Confidence assigned to substring matches.
    pub substring_confidence: u8,
    /// Both words must have at least this many characters for a substring
    /// match to count. The default of 1 accepts every containment; raise it
    /// to keep very short words out of the substring phase.
    pub min_substring_len: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            max_suggestions: 5,
            substring_confidence: 95,
            min_substring_len: 1,
        }
    }
}

/// Main spelling suggestion engine.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(config: SuggestionConfig) -> Self {
        SuggestionEngine { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Get suggestions for a normalized word that is not in the snapshot.
    ///
    /// `script` restricts the candidates: a definite script only matches
    /// entries of that script (plus `Mixed` entries); `Mixed` or `Unknown`
    /// matches everything.
    pub fn suggest(
        &self,
        normalized: &str,
        script: Script,
        snapshot: &DictionarySnapshot,
    ) -> Vec<Suggestion> {
        let cap = self.config.max_suggestions;
        if normalized.is_empty() || cap == 0 {
            return Vec::new();
        }

        let candidates = || {
            snapshot
                .iter()
                .filter(move |(key, entry)| *key != normalized && script_matches(script, entry))
        };

        // Phase 1: the snapshot iterates in descending trust order already.
        let mut matched: AHashSet<&str> = AHashSet::new();
        let mut suggestions = Vec::with_capacity(cap);
        for (key, entry) in candidates() {
            if suggestions.len() == cap {
                return suggestions;
            }
            if self.is_substring_match(normalized, key) {
                matched.insert(key);
                suggestions.push(Suggestion::substring(entry, self.config.substring_confidence));
            }
        }
        if suggestions.len() == cap {
            return suggestions;
        }

        // Phase 2
        let mut near: Vec<Suggestion> = candidates()
            .filter(|(key, _)| !matched.contains(key))
            .filter_map(|(key, entry)| {
                distance_within(normalized, key, self.config.max_distance)
                    .map(|d| Suggestion::edit_distance(entry, d))
            })
            .collect();
        near.sort_by(Suggestion::rank);
        near.truncate(cap - suggestions.len());

        suggestions.extend(near);
        suggestions
    }

    fn is_substring_match(&self, word: &str, candidate: &str) -> bool {
        let min = self.config.min_substring_len;
        if word.chars().count() < min || candidate.chars().count() < min {
            return false;
        }
        candidate.contains(word) || word.contains(candidate)
    }
}

fn script_matches(script: Script, entry: &DictionaryEntry) -> bool {
    !script.is_definite() || entry.script == Script::Mixed || entry.script == script
}
