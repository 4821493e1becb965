//! Script detection for Latin/Cyrillic text.
//!
//! Detection counts the letters of each alphabet and only commits to a script
//! when it clearly dominates, so a Latin sentence with one Cyrillic loanword is
//! still Latin, while a handful of letters is never enough to decide.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{is_cyrillic_letter, is_latin_letter};

/// Writing system of a text span or dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin alphabet.
    #[serde(alias = "lotin")]
    Latin,
    /// Cyrillic alphabet.
    #[serde(alias = "kiril")]
    Cyrillic,
    /// Both alphabets without a dominant one.
    Mixed,
    /// Too few recognized letters to tell.
    Unknown,
}

impl Script {
    /// The script that auto-transliteration converts into, if any.
    pub fn opposite(self) -> Option<Script> {
        match self {
            Script::Latin => Some(Script::Cyrillic),
            Script::Cyrillic => Some(Script::Latin),
            Script::Mixed | Script::Unknown => None,
        }
    }

    /// Whether this is a definite single script.
    pub fn is_definite(self) -> bool {
        matches!(self, Script::Latin | Script::Cyrillic)
    }

    /// Name used in reports and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cyrillic => "cyrillic",
            Script::Mixed => "mixed",
            Script::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Letter counts behind a detection decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStats {
    /// The detected script.
    pub script: Script,
    /// Number of Cyrillic letters.
    pub cyrillic: usize,
    /// Number of Latin letters.
    pub latin: usize,
    /// Total recognized letters.
    pub total: usize,
    /// Cyrillic share in percent (0.0 when there are no letters).
    pub cyrillic_percent: f64,
    /// Latin share in percent (0.0 when there are no letters).
    pub latin_percent: f64,
}

/// Classifies text as Latin, Cyrillic, Mixed or Unknown.
#[derive(Debug, Clone, Copy)]
pub struct ScriptDetector {
    min_letters: usize,
    dominance: f64,
}

impl ScriptDetector {
    /// Default minimum number of recognized letters.
    pub const DEFAULT_MIN_LETTERS: usize = 3;
    /// Default share a script needs to win.
    pub const DEFAULT_DOMINANCE: f64 = 0.8;

    /// Create a detector with the default thresholds.
    pub fn new() -> Self {
        ScriptDetector {
            min_letters: Self::DEFAULT_MIN_LETTERS,
            dominance: Self::DEFAULT_DOMINANCE,
        }
    }

    /// Create a detector with custom thresholds.
    ///
    /// `dominance` is clamped to `0.5..=1.0`, below one half two scripts
    /// could both win.
    pub fn with_thresholds(min_letters: usize, dominance: f64) -> Self {
        ScriptDetector {
            min_letters,
            dominance: dominance.clamp(0.5, 1.0),
        }
    }

    /// Detect the script of a text span.
    pub fn detect(&self, text: &str) -> Script {
        self.stats(text).script
    }

    /// Detect the script and report the letter counts.
    pub fn stats(&self, text: &str) -> ScriptStats {
        let (mut cyrillic, mut latin) = (0usize, 0usize);
        for c in text.chars() {
            if is_cyrillic_letter(c) {
                cyrillic += 1;
            } else if is_latin_letter(c) {
                latin += 1;
            }
        }

        let total = cyrillic + latin;
        let percent = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            }
        };

        let script = if total == 0 || total < self.min_letters {
            Script::Unknown
        } else if cyrillic as f64 / total as f64 >= self.dominance {
            Script::Cyrillic
        } else if latin as f64 / total as f64 >= self.dominance {
            Script::Latin
        } else {
            Script::Mixed
        };

        ScriptStats {
            script,
            cyrillic,
            latin,
            total,
            cyrillic_percent: percent(cyrillic),
            latin_percent: percent(latin),
        }
    }
}

impl Default for ScriptDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_single_script() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("Qaraqalpaqstan Respublikası"), Script::Latin);
        assert_eq!(detector.detect("Қарақалпақстан Республикасы"), Script::Cyrillic);
    }

    #[test]
    fn test_detect_mixed_below_dominance() {
        let detector = ScriptDetector::new();
        // 5 Latin vs 3 Cyrillic letters: 62.5% is not dominant.
        assert_eq!(detector.detect("Hello мир"), Script::Mixed);
        assert_eq!(detector.detect("Қарақалпақ tili ҳәм lotin"), Script::Mixed);
    }

    #[test]
    fn test_detect_tolerates_loanword() {
        let detector = ScriptDetector::new();
        assert_eq!(
            detector.detect("Men búgin mektepke bardım hám kitap oqıdım, ол"),
            Script::Latin
        );
    }

    #[test]
    fn test_detect_too_few_letters() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect(""), Script::Unknown);
        assert_eq!(detector.detect("ok"), Script::Unknown);
        assert_eq!(detector.detect("12345 !!"), Script::Unknown);
    }

    #[test]
    fn test_stats_percentages() {
        let stats = ScriptDetector::new().stats("abc где");
        assert_eq!(stats.latin, 3);
        assert_eq!(stats.cyrillic, 3);
        assert_eq!(stats.total, 6);
        assert!((stats.latin_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.script, Script::Mixed);
    }

    #[test]
    fn test_script_serde_aliases() {
        let latin: Script = serde_json::from_str("\"lotin\"").unwrap();
        let cyrillic: Script = serde_json::from_str("\"kiril\"").unwrap();
        assert_eq!(latin, Script::Latin);
        assert_eq!(cyrillic, Script::Cyrillic);
        assert_eq!(serde_json::to_string(&Script::Mixed).unwrap(), "\"mixed\"");
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Script::Latin.opposite(), Some(Script::Cyrillic));
        assert_eq!(Script::Cyrillic.opposite(), Some(Script::Latin));
        assert_eq!(Script::Mixed.opposite(), None);
    }
}
