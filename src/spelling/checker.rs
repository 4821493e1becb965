//! Token-by-token spell checking against a dictionary snapshot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::script::{Script, ScriptDetector};
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::spelling::dictionary::{DictionaryEntry, DictionarySnapshot};
use crate::spelling::suggest::{Suggestion, SuggestionConfig, SuggestionEngine};

/// Outcome of checking one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellResult {
    /// The checked token with its span.
    pub token: Token,
    /// Whether the normalized token is in the dictionary.
    pub is_correct: bool,
    /// Detected script of the token.
    pub script: Script,
    /// Ranked suggestions, empty for correct tokens.
    pub suggestions: Vec<Suggestion>,
    /// The matching dictionary entry, for correct tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<DictionaryEntry>,
}

impl SpellResult {
    /// The highest ranked suggestion, if any.
    pub fn best_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }
}

/// Summary counts of a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    /// Number of checked tokens.
    pub total_words: usize,
    /// Tokens found in the dictionary.
    pub correct_words: usize,
    /// Tokens not found in the dictionary.
    pub incorrect_words: usize,
    /// Share of correct tokens in percent, rounded to two decimals.
    pub accuracy: f64,
    /// Length of the text in characters.
    pub text_length: usize,
}

impl TextStatistics {
    /// Compute statistics for a text and its check results.
    pub fn compute(text: &str, results: &[SpellResult]) -> Self {
        let total_words = results.len();
        let correct_words = results.iter().filter(|r| r.is_correct).count();
        let accuracy = if total_words > 0 {
            let ratio = correct_words as f64 / total_words as f64 * 100.0;
            (ratio * 100.0).round() / 100.0
        } else {
            0.0
        };

        TextStatistics {
            total_words,
            correct_words,
            incorrect_words: total_words - correct_words,
            accuracy,
            text_length: text.chars().count(),
        }
    }
}

/// Validation outcome of a single standalone word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordValidation {
    /// The word as given.
    pub word: String,
    /// Its normalized form.
    pub normalized: String,
    /// Whether the word is in the dictionary.
    pub is_valid: bool,
    /// The matching entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<DictionaryEntry>,
    /// Suggestions for invalid words.
    pub suggestions: Vec<Suggestion>,
}

/// Spell checker over dictionary snapshots.
#[derive(Debug, Clone, Default)]
pub struct SpellChecker {
    tokenizer: Tokenizer,
    detector: ScriptDetector,
    suggester: SuggestionEngine,
}

impl SpellChecker {
    /// Create a checker with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a checker with custom suggestion settings and script detector.
    pub fn with_config(config: SuggestionConfig, detector: ScriptDetector) -> Self {
        SpellChecker {
            tokenizer: Tokenizer::new(),
            detector,
            suggester: SuggestionEngine::with_config(config),
        }
    }

    /// The suggestion engine.
    pub fn suggester(&self) -> &SuggestionEngine {
        &self.suggester
    }

    /// Check every word of `text`, in text order.
    ///
    /// Empty text yields no results. Tokens that normalize to nothing are
    /// skipped.
    pub fn check(&self, text: &str, snapshot: &DictionarySnapshot) -> Vec<SpellResult> {
        let results: Vec<SpellResult> = self
            .tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|token| !token.is_blank())
            .map(|token| self.check_token(token, snapshot))
            .collect();

        debug!(
            "Checked {} tokens against snapshot generation {}, {} incorrect",
            results.len(),
            snapshot.generation(),
            results.iter().filter(|r| !r.is_correct).count()
        );
        results
    }

    /// Check a single token.
    pub fn check_token(&self, token: Token, snapshot: &DictionarySnapshot) -> SpellResult {
        let script = self.detector.detect(&token.text);
        match snapshot.get(&token.normalized) {
            Some(entry) => SpellResult {
                token,
                is_correct: true,
                script,
                suggestions: Vec::new(),
                entry: Some(entry.clone()),
            },
            None => {
                let suggestions = self.suggester.suggest(&token.normalized, script, snapshot);
                SpellResult {
                    token,
                    is_correct: false,
                    script,
                    suggestions,
                    entry: None,
                }
            }
        }
    }

    /// Validate standalone words, one result per input word.
    pub fn validate_words<S: AsRef<str>>(
        &self,
        words: &[S],
        snapshot: &DictionarySnapshot,
    ) -> Vec<WordValidation> {
        words
            .iter()
            .map(|word| {
                let word = word.as_ref();
                let normalized = normalize(word);
                let entry = snapshot.get(&normalized).cloned();
                let suggestions = if entry.is_none() && !normalized.is_empty() {
                    let script = self.detector.detect(word);
                    self.suggester.suggest(&normalized, script, snapshot)
                } else {
                    Vec::new()
                };

                WordValidation {
                    word: word.to_string(),
                    is_valid: entry.is_some(),
                    normalized,
                    entry,
                    suggestions,
                }
            })
            .collect()
    }

    /// Compute summary statistics for a check.
    pub fn statistics(&self, text: &str, results: &[SpellResult]) -> TextStatistics {
        TextStatistics::compute(text, results)
    }
}
