//! Automatic correction of confidently misspelled words.
//!
//! Replacements are applied left to right on a copy of the text. Every
//! replacement shifts the bytes after it, so each token span is translated by
//! the running sum of `replacement.len() - original.len()` before slicing.
//! The text is composed to NFC up front, so the corrected text and every
//! position refer to the composed form.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{CaseShape, compose};
use crate::spelling::checker::SpellChecker;
use crate::spelling::dictionary::DictionarySnapshot;

/// Default minimum confidence for an automatic replacement.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// One applied replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The word as it appeared in the input.
    pub original: String,
    /// The replacement, re-cased like the original.
    pub corrected: String,
    /// Byte offset of the replacement in the corrected text.
    pub position: usize,
    /// Confidence of the suggestion that was applied.
    pub confidence: u8,
}

/// Result of auto-correcting a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCorrection {
    /// The text with all replacements applied.
    pub corrected_text: String,
    /// Applied replacements in text order.
    pub corrections: Vec<Correction>,
}

impl AutoCorrection {
    /// Whether anything was replaced.
    pub fn is_changed(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Applies top suggestions whose confidence reaches a threshold.
#[derive(Debug, Clone)]
pub struct AutoCorrector {
    checker: SpellChecker,
    threshold: u8,
}

impl Default for AutoCorrector {
    fn default() -> Self {
        Self::new(SpellChecker::new())
    }
}

impl AutoCorrector {
    /// Create a corrector with the default threshold.
    pub fn new(checker: SpellChecker) -> Self {
        Self::with_threshold(checker, DEFAULT_THRESHOLD)
    }

    /// Create a corrector with a custom threshold.
    pub fn with_threshold(checker: SpellChecker, threshold: u8) -> Self {
        AutoCorrector { checker, threshold }
    }

    /// The minimum confidence for a replacement.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Correct `text` against a snapshot.
    ///
    /// Only incorrect tokens whose top suggestion has a confidence of at
    /// least the threshold are replaced; everything else is left as written.
    pub fn auto_correct(&self, text: &str, snapshot: &DictionarySnapshot) -> AutoCorrection {
        let text = compose(text);
        let results = self.checker.check(&text, snapshot);

        let mut corrected_text = text.into_owned();
        let mut corrections = Vec::new();
        let mut delta: isize = 0;

        for result in results.iter().filter(|r| !r.is_correct) {
            let Some(best) = result.best_suggestion() else {
                continue;
            };
            if best.confidence < self.threshold {
                continue;
            }

            let token = &result.token;
            let replacement = CaseShape::of(&token.text).apply(&best.word);
            if replacement == token.text {
                continue;
            }

            let (Some(start), Some(end)) = (
                token.start.checked_add_signed(delta),
                token.end.checked_add_signed(delta),
            ) else {
                warn!("Skipping correction of {:?}: span out of range", token.text);
                continue;
            };
            if corrected_text.get(start..end) != Some(token.text.as_str()) {
                warn!(
                    "Skipping correction of {:?}: span {}..{} does not match",
                    token.text, start, end
                );
                continue;
            }

            corrected_text.replace_range(start..end, &replacement);
            delta += replacement.len() as isize - token.byte_len() as isize;
            corrections.push(Correction {
                original: token.text.clone(),
                corrected: replacement,
                position: start,
                confidence: best.confidence,
            });
        }

        debug!("Applied {} corrections", corrections.len());
        AutoCorrection {
            corrected_text,
            corrections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> DictionarySnapshot {
        DictionarySnapshot::from_words([
            "salam",
            "men",
            "aytaman",
            "qaraqalpaqstan",
            "ол",
            "мектепке",
            "барды",
        ])
    }

    #[test]
    fn test_single_correction() {
        let corrector = AutoCorrector::default();
        let result = corrector.auto_correct("men salm aytaman", &snapshot());

        assert_eq!(result.corrected_text, "men salam aytaman");
        assert_eq!(
            result.corrections,
            vec![Correction {
                original: "salm".to_string(),
                corrected: "salam".to_string(),
                position: 4,
                confidence: 75,
            }]
        );
    }

    #[test]
    fn test_offsets_shift_after_each_replacement() {
        let corrector = AutoCorrector::default();
        let text = "salm qaraqalpaqstn salm, aytamn salm";
        let result = corrector.auto_correct(text, &snapshot());

        assert_eq!(
            result.corrected_text,
            "salam qaraqalpaqstan salam, aytaman salam"
        );
        assert_eq!(result.corrections.len(), 5);
        for correction in &result.corrections {
            let end = correction.position + correction.corrected.len();
            assert_eq!(&result.corrected_text[correction.position..end], correction.corrected);
        }
    }

    #[test]
    fn test_multibyte_text() {
        let corrector = AutoCorrector::default();
        let text = "Ол мектепкe барды, ол мектепке барди.";
        let result = corrector.auto_correct(text, &snapshot());

        assert_eq!(result.corrected_text, "Ол мектепке барды, ол мектепке барды.");
        assert_eq!(result.corrections.len(), 2);
        let first = &result.corrections[0];
        assert_eq!(first.original, "мектепкe");
        assert_eq!(&result.corrected_text[first.position..first.position + first.corrected.len()], "мектепке");
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        let snapshot = DictionarySnapshot::from_words(["dúnya", "ǵárezsizlik", "salam"]);
        let corrector = AutoCorrector::default();

        let result = corrector.auto_correct("salm du\u{301}nya g\u{301}a\u{301}rezsizlk", &snapshot);
        assert_eq!(result.corrected_text, "salam dúnya ǵárezsizlik");
        assert_eq!(result.corrections.len(), 2);
        assert_eq!(result.corrections[1].original, "ǵárezsizlk");
        for c in &result.corrections {
            assert_eq!(&result.corrected_text[c.position..c.position + c.corrected.len()], c.corrected);
        }
    }

    #[test]
    fn test_case_shape_preserved() {
        let corrector = AutoCorrector::default();
        let result = corrector.auto_correct("Salm! SALM salm", &snapshot());
        assert_eq!(result.corrected_text, "Salam! SALAM salam");
    }

    #[test]
    fn test_low_confidence_untouched() {
        let corrector = AutoCorrector::default();
        let text = "men slmm aytaman xyzzy";
        let result = corrector.auto_correct(text, &snapshot());
        assert_eq!(result.corrected_text, text);
        assert!(!result.is_changed());

        let strict = AutoCorrector::with_threshold(SpellChecker::new(), 76);
        let result = strict.auto_correct("men salm aytaman", &snapshot());
        assert!(!result.is_changed());
    }

    #[test]
    fn test_never_out_of_bounds() {
        let corrector = AutoCorrector::default();
        let words = ["salm", "salam", "aytamn", "мектепкe", "қ", "!!", "qaraqalpaqstn", "x"];
        for i in 0..words.len() {
            for j in 0..words.len() {
                for k in 0..words.len() {
                    let text = format!("{} {}, {}.", words[i], words[j], words[k]);
                    let result = corrector.auto_correct(&text, &snapshot());
                    for c in &result.corrections {
                        assert!(c.position + c.corrected.len() <= result.corrected_text.len());
                    }
                }
            }
        }
    }
}
