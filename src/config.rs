//! Runtime configuration.
//!
//! Every section has defaults, so a configuration file only needs the values
//! it changes:
//!
//! ```
//! use imla::config::ImlaConfig;
//!
//! let config = ImlaConfig::from_json(r#"{ "spelling": { "max_suggestions": 3 } }"#).unwrap();
//! assert_eq!(config.spelling.max_suggestions, 3);
//! assert_eq!(config.spelling.max_distance, 2);
//! assert_eq!(config.dictionary.ttl_secs, 300);
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::script::ScriptDetector;
use crate::error::{ImlaError, Result};
use crate::spelling::suggest::SuggestionConfig;

/// Dictionary cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Snapshot time-to-live in seconds.
    pub ttl_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig { ttl_secs: 300 }
    }
}

impl DictionaryConfig {
    /// The TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Spell checking and auto-correction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Maximum edit distance of a suggestion.
    pub max_distance: u32,
    /// Maximum number of suggestions per word.
    pub max_suggestions: usize,
    /// Confidence of substring matches.
    pub substring_confidence: u8,
    /// Minimum length in characters for substring matching.
    pub min_substring_len: usize,
    /// Minimum confidence for an automatic replacement.
    pub auto_correct_threshold: u8,
}

impl Default for SpellConfig {
    fn default() -> Self {
        let suggestion = SuggestionConfig::default();
        SpellConfig {
            max_distance: suggestion.max_distance,
            max_suggestions: suggestion.max_suggestions,
            substring_confidence: suggestion.substring_confidence,
            min_substring_len: suggestion.min_substring_len,
            auto_correct_threshold: 75,
        }
    }
}

impl SpellConfig {
    /// Settings for the suggestion engine.
    pub fn suggestion_config(&self) -> SuggestionConfig {
        SuggestionConfig {
            max_distance: self.max_distance,
            max_suggestions: self.max_suggestions,
            substring_confidence: self.substring_confidence,
            min_substring_len: self.min_substring_len,
        }
    }
}

/// Script detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Fewer recognized letters than this yield `Unknown`.
    pub min_letters: usize,
    /// Share of letters a script needs to win, between 0.5 and 1.0.
    pub dominance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            min_letters: ScriptDetector::DEFAULT_MIN_LETTERS,
            dominance: ScriptDetector::DEFAULT_DOMINANCE,
        }
    }
}

impl DetectionConfig {
    /// Build the detector.
    pub fn detector(&self) -> ScriptDetector {
        ScriptDetector::with_thresholds(self.min_letters, self.dominance)
    }
}

/// Input size limits enforced at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum text length in characters.
    pub max_text_length: usize,
    /// Maximum number of texts in a batch.
    pub max_batch_items: usize,
    /// Maximum length of a single batch text in characters.
    pub max_batch_item_length: usize,
    /// Maximum number of words in a validation request.
    pub max_validate_words: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_text_length: 100_000,
            max_batch_items: 100,
            max_batch_item_length: 10_000,
            max_validate_words: 100,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImlaConfig {
    /// Dictionary cache.
    pub dictionary: DictionaryConfig,
    /// Spell checking.
    pub spelling: SpellConfig,
    /// Script detection.
    pub detection: DetectionConfig,
    /// Input limits.
    pub limits: LimitsConfig,
}

impl ImlaConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ImlaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ImlaError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.spelling.max_suggestions == 0 {
            return Err(ImlaError::config("spelling.max_suggestions must be at least 1"));
        }
        if self.spelling.substring_confidence > 100 || self.spelling.auto_correct_threshold > 100 {
            return Err(ImlaError::config("confidence values must be between 0 and 100"));
        }
        if !(0.5..=1.0).contains(&self.detection.dominance) {
            return Err(ImlaError::config(format!(
                "detection.dominance must be between 0.5 and 1.0, got {}",
                self.detection.dominance
            )));
        }
        if self.limits.max_text_length == 0
            || self.limits.max_batch_items == 0
            || self.limits.max_batch_item_length == 0
            || self.limits.max_validate_words == 0
        {
            return Err(ImlaError::config("limits must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ImlaConfig::default();
        assert_eq!(config.dictionary.ttl(), Duration::from_secs(300));
        assert_eq!(config.spelling.max_distance, 2);
        assert_eq!(config.spelling.max_suggestions, 5);
        assert_eq!(config.spelling.substring_confidence, 95);
        assert_eq!(config.spelling.auto_correct_threshold, 75);
        assert_eq!(config.detection.min_letters, 3);
        assert_eq!(config.limits.max_text_length, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ImlaConfig::from_json(r#"{"limits": {"max_batch_items": 10}}"#).unwrap();
        assert_eq!(config.limits.max_batch_items, 10);
        assert_eq!(config.limits.max_batch_item_length, 10_000);

        let empty = ImlaConfig::from_json("{}").unwrap();
        assert_eq!(empty, ImlaConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = ImlaConfig::from_json(r#"{"detection": {"dominance": 0.3}}"#).unwrap_err();
        assert!(matches!(err, ImlaError::Config(_)));

        let err = ImlaConfig::from_json(r#"{"spelling": {"max_suggestions": 0}}"#).unwrap_err();
        assert!(matches!(err, ImlaError::Config(_)));

        assert!(ImlaConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dictionary": {{"ttl_secs": 60}}}}"#).unwrap();

        let config = ImlaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dictionary.ttl_secs, 60);

        let err = ImlaConfig::from_file("/nonexistent/imla.json").unwrap_err();
        assert!(matches!(err, ImlaError::Config(_)));
    }

    #[test]
    fn test_suggestion_config_mapping() {
        let spelling = SpellConfig {
            max_suggestions: 3,
            ..SpellConfig::default()
        };
        let suggestion = spelling.suggestion_config();
        assert_eq!(suggestion.max_suggestions, 3);
        assert_eq!(suggestion.max_distance, 2);
    }
}
