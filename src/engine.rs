//! The `Imla` facade: one entry point over the whole crate.
//!
//! The facade validates input sizes, obtains a dictionary snapshot for each
//! request and hands it to the pure checking, correction and search code.
//! A single snapshot is used for the whole of a request, so a concurrent
//! refresh never mixes two vocabularies in one result.
//!
//! Text is composed to NFC before it is processed, so token spans, correction
//! positions and outputs all refer to the composed form of the input.

use std::io::Write;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{compose, normalize};
use crate::analysis::script::{Script, ScriptStats};
use crate::config::ImlaConfig;
use crate::error::{ImlaError, Result};
use crate::spelling::checker::{SpellChecker, SpellResult, TextStatistics, WordValidation};
use crate::spelling::clock::{Clock, SystemClock};
use crate::spelling::corrector::{AutoCorrection, AutoCorrector};
use crate::spelling::dictionary::DictionaryStats;
use crate::spelling::index::{DictionaryIndex, SnapshotInfo};
use crate::spelling::search::{MIN_QUERY_CHARS, SearchHit, WordSearch};
use crate::spelling::store::{DictionaryStore, WordListFormat, write_entries};
use crate::transliteration::{
    AutoTransliteration, BatchItem, Direction, TransliterationMode, Transliterator,
};

/// Spell check of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckReport {
    /// One result per word, in text order.
    pub results: Vec<SpellResult>,
    /// Summary counts.
    pub statistics: TextStatistics,
    /// The snapshot the text was checked against.
    pub dictionary: SnapshotInfo,
}

/// Summary of a word validation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of words.
    pub total: usize,
    /// Words found in the dictionary.
    pub valid: usize,
    /// Words not found.
    pub invalid: usize,
    /// Share of valid words in percent, one decimal.
    pub accuracy: f64,
}

/// Validation of standalone words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One result per word, in input order.
    pub results: Vec<WordValidation>,
    /// Summary counts.
    pub summary: ValidationSummary,
}

/// Spell checker, auto-corrector and transliterator over a cached dictionary.
pub struct Imla {
    config: ImlaConfig,
    index: DictionaryIndex,
    checker: SpellChecker,
    corrector: AutoCorrector,
    transliterator: Transliterator,
    search: WordSearch,
}

impl Imla {
    /// Create an engine over `store` with the default configuration.
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self::with_config(store, ImlaConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(store: Arc<dyn DictionaryStore>, config: ImlaConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create an engine with a custom configuration and clock.
    pub fn with_clock(
        store: Arc<dyn DictionaryStore>,
        config: ImlaConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let detector = config.detection.detector();
        let checker = SpellChecker::with_config(config.spelling.suggestion_config(), detector);
        let corrector =
            AutoCorrector::with_threshold(checker.clone(), config.spelling.auto_correct_threshold);

        Imla {
            index: DictionaryIndex::with_clock(store, config.dictionary.ttl(), clock),
            checker,
            corrector,
            transliterator: Transliterator::with_detector(detector),
            search: WordSearch::new(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ImlaConfig {
        &self.config
    }

    /// The dictionary cache.
    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    /// Check the spelling of every word of `text`.
    pub fn check_text(&self, text: &str) -> Result<SpellCheckReport> {
        self.validate_text(text)?;
        let text = compose(text);
        let handle = self.index.get_snapshot(false)?;

        let results = self.checker.check(&text, &handle.snapshot);
        let statistics = self.checker.statistics(&text, &results);
        Ok(SpellCheckReport {
            results,
            statistics,
            dictionary: handle.info(),
        })
    }

    /// Replace confidently misspelled words of `text`.
    pub fn auto_correct(&self, text: &str) -> Result<AutoCorrection> {
        self.validate_text(text)?;
        let handle = self.index.get_snapshot(false)?;
        Ok(self.corrector.auto_correct(text, &handle.snapshot))
    }

    /// Convert `text` in the given direction.
    pub fn transliterate(&self, text: &str, direction: Direction) -> Result<String> {
        self.validate_text(text)?;
        Ok(self.transliterator.transliterate(text, direction))
    }

    /// Convert `text` into the script it is not written in.
    pub fn auto_transliterate(&self, text: &str) -> Result<AutoTransliteration> {
        self.validate_text(text)?;
        Ok(self.transliterator.auto_transliterate(&compose(text)))
    }

    /// Convert many texts. Oversized items get a per-item error.
    pub fn transliterate_batch<S>(&self, texts: &[S], mode: TransliterationMode) -> Result<Vec<BatchItem>>
    where
        S: AsRef<str> + Sync,
    {
        let limits = &self.config.limits;
        if texts.is_empty() {
            return Err(ImlaError::invalid_input("batch must contain at least one text"));
        }
        if texts.len() > limits.max_batch_items {
            return Err(ImlaError::invalid_input(format!(
                "batch has {} texts, at most {} are allowed",
                texts.len(),
                limits.max_batch_items
            )));
        }

        debug!("Transliterating a batch of {} texts ({mode:?})", texts.len());
        Ok(self
            .transliterator
            .transliterate_batch(texts, mode, limits.max_batch_item_length))
    }

    /// Detect the script of `text` with letter counts.
    pub fn detect_script(&self, text: &str) -> Result<ScriptStats> {
        self.validate_text(text)?;
        Ok(self.transliterator.detector().stats(&compose(text)))
    }

    /// Get the current snapshot, reloading it when forced or expired.
    pub fn refresh_dictionary(&self, force: bool) -> Result<SnapshotInfo> {
        self.index.get_snapshot(force).map(|handle| handle.info())
    }

    /// Search the vocabulary for words like `query`.
    pub fn search_words(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if normalize(query).chars().count() < MIN_QUERY_CHARS {
            return Err(ImlaError::invalid_input(format!(
                "search query must have at least {MIN_QUERY_CHARS} letters"
            )));
        }
        let handle = self.index.get_snapshot(false)?;
        Ok(self.search.search(query, &handle.snapshot, limit))
    }

    /// Check standalone words against the dictionary.
    pub fn validate_words<S: AsRef<str>>(&self, words: &[S]) -> Result<ValidationReport> {
        let max = self.config.limits.max_validate_words;
        if words.is_empty() {
            return Err(ImlaError::invalid_input("at least one word is required"));
        }
        if words.len() > max {
            return Err(ImlaError::invalid_input(format!(
                "{} words given, at most {max} are allowed",
                words.len()
            )));
        }

        let handle = self.index.get_snapshot(false)?;
        let results = self.checker.validate_words(words, &handle.snapshot);
        let valid = results.iter().filter(|r| r.is_valid).count();
        let accuracy = (valid as f64 / results.len() as f64 * 1000.0).round() / 10.0;

        Ok(ValidationReport {
            summary: ValidationSummary {
                total: results.len(),
                valid,
                invalid: results.len() - valid,
                accuracy,
            },
            results,
        })
    }

    /// Counts of the current snapshot.
    pub fn dictionary_stats(&self) -> Result<DictionaryStats> {
        Ok(self.index.get_snapshot(false)?.snapshot.stats())
    }

    /// Write the vocabulary, optionally only one script, as a word list.
    ///
    /// Returns the number of words written.
    pub fn export_dictionary<W: Write>(
        &self,
        format: WordListFormat,
        script: Option<Script>,
        writer: W,
    ) -> Result<usize> {
        let handle = self.index.get_snapshot(false)?;
        let entries = handle
            .snapshot
            .entries()
            .iter()
            .filter(|entry| script.is_none_or(|s| entry.script == s));
        write_entries(entries, format, writer)
    }

    fn validate_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ImlaError::invalid_input("text must not be empty"));
        }
        let max = self.config.limits.max_text_length;
        let len = text.chars().count();
        if len > max {
            return Err(ImlaError::invalid_input(format!(
                "text has {len} characters, at most {max} are allowed"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Imla {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Imla")
            .field("config", &self.config)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
