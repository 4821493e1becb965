//! Greedy longest-match transliteration between Cyrillic and Latin.
//!
//! The scan walks the text once. At every position it tries the longest
//! sequence window the rule set knows (4, then 3, then 2 characters) before
//! the single-character table, so digraphs such as `sh` or `ьо` are never
//! split. Characters without a rule are copied through.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{capitalize, compose, fold_char, upper_case};
use crate::analysis::script::{Script, ScriptDetector};
use crate::error::{ImlaError, Result};
use crate::transliteration::rules::{RuleSet, TO_CYRILLIC, TO_LATIN};

/// Target of a transliteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Cyrillic to Latin.
    ToLatin,
    /// Latin to Cyrillic.
    ToCyrillic,
}

impl Direction {
    /// Script of the input.
    pub fn source(self) -> Script {
        match self {
            Direction::ToLatin => Script::Cyrillic,
            Direction::ToCyrillic => Script::Latin,
        }
    }

    /// Script of the output.
    pub fn target(self) -> Script {
        match self {
            Direction::ToLatin => Script::Latin,
            Direction::ToCyrillic => Script::Cyrillic,
        }
    }

    /// Direction that converts text of `script` into the other script.
    pub fn from_source(script: Script) -> Option<Direction> {
        match script {
            Script::Cyrillic => Some(Direction::ToLatin),
            Script::Latin => Some(Direction::ToCyrillic),
            Script::Mixed | Script::Unknown => None,
        }
    }

    fn rules(self) -> &'static RuleSet {
        match self {
            Direction::ToLatin => &TO_LATIN,
            Direction::ToCyrillic => &TO_CYRILLIC,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToLatin => write!(f, "to-latin"),
            Direction::ToCyrillic => write!(f, "to-cyrillic"),
        }
    }
}

/// How each item of a batch is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransliterationMode {
    /// Detect the script of each item and convert to the other one.
    #[default]
    Auto,
    /// Always Cyrillic to Latin.
    ToLatin,
    /// Always Latin to Cyrillic.
    ToCyrillic,
}

impl FromStr for TransliterationMode {
    type Err = ImlaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "auto" => Ok(TransliterationMode::Auto),
            "tolatin" | "latin" => Ok(TransliterationMode::ToLatin),
            "tocyrillic" | "cyrillic" => Ok(TransliterationMode::ToCyrillic),
            other => Err(ImlaError::invalid_input(format!(
                "Unknown transliteration mode: {other}"
            ))),
        }
    }
}

impl From<Direction> for TransliterationMode {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::ToLatin => TransliterationMode::ToLatin,
            Direction::ToCyrillic => TransliterationMode::ToCyrillic,
        }
    }
}

/// Result of converting text into the script it is not written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoTransliteration {
    /// Converted text, or the input unchanged when not confident.
    pub result: String,
    /// Detected script of the input.
    pub from: Script,
    /// Script of the result.
    pub to: Script,
    /// False when the input script could not be determined.
    pub confident: bool,
}

/// Result for one item of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Position of the item in the input.
    pub index: usize,
    /// The converted text, absent on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted: Option<String>,
    /// Source script.
    pub from: Script,
    /// Target script.
    pub to: Script,
    /// Why the item was not converted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    /// Whether the item was converted.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Rule-based transliterator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transliterator {
    detector: ScriptDetector,
}

impl Transliterator {
    /// Create a transliterator with the default script detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transliterator using `detector` for auto mode.
    pub fn with_detector(detector: ScriptDetector) -> Self {
        Transliterator { detector }
    }

    /// The script detector used by auto mode.
    pub fn detector(&self) -> &ScriptDetector {
        &self.detector
    }

    /// Convert `text` in the given direction. Decomposed accents are
    /// composed first so `g` + U+0301 converts like `ǵ`.
    pub fn transliterate(&self, text: &str, direction: Direction) -> String {
        let rules = direction.rules();
        let chars: Vec<char> = compose(text).chars().collect();
        let mut out = String::with_capacity(text.len() + text.len() / 4);

        let mut pos = 0;
        while pos < chars.len() {
            let longest = rules.max_window().min(chars.len() - pos);
            let mut consumed = 0;

            for width in (2..=longest).rev() {
                let window = &chars[pos..pos + width];
                let key: String = window.iter().copied().map(fold_char).collect();
                if let Some(replacement) = rules.sequence(&key) {
                    push_cased(&mut out, replacement, &chars, pos, width);
                    consumed = width;
                    break;
                }
            }

            if consumed == 0 {
                let c = chars[pos];
                match rules.single(fold_char(c)) {
                    Some(replacement) => push_cased(&mut out, replacement, &chars, pos, 1),
                    None => out.push(c),
                }
                consumed = 1;
            }

            pos += consumed;
        }

        out
    }

    /// Detect the script of `text` and convert it into the other one.
    ///
    /// Mixed or undetermined input is returned unchanged with
    /// `confident == false`.
    pub fn auto_transliterate(&self, text: &str) -> AutoTransliteration {
        let from = self.detector.detect(text);
        match Direction::from_source(from) {
            Some(direction) => AutoTransliteration {
                result: self.transliterate(text, direction),
                from,
                to: direction.target(),
                confident: true,
            },
            None => {
                debug!("Not transliterating text of {from} script");
                AutoTransliteration {
                    result: text.to_string(),
                    from,
                    to: from,
                    confident: false,
                }
            }
        }
    }

    /// Convert many texts in parallel.
    ///
    /// Items longer than `max_item_chars` characters get an error instead of
    /// a conversion; the rest of the batch is unaffected. Results keep the
    /// input order.
    pub fn transliterate_batch<S>(
        &self,
        texts: &[S],
        mode: TransliterationMode,
        max_item_chars: usize,
    ) -> Vec<BatchItem>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .enumerate()
            .map(|(index, text)| self.convert_item(index, text.as_ref(), mode, max_item_chars))
            .collect()
    }

    fn convert_item(
        &self,
        index: usize,
        text: &str,
        mode: TransliterationMode,
        max_item_chars: usize,
    ) -> BatchItem {
        let (direction, from) = match mode {
            TransliterationMode::ToLatin => (Some(Direction::ToLatin), Script::Cyrillic),
            TransliterationMode::ToCyrillic => (Some(Direction::ToCyrillic), Script::Latin),
            TransliterationMode::Auto => {
                let from = self.detector.detect(text);
                (Direction::from_source(from), from)
            }
        };
        let to = direction.map_or(from, Direction::target);

        let error = if text.chars().count() > max_item_chars {
            Some(format!("text is longer than {max_item_chars} characters"))
        } else if direction.is_none() {
            Some(format!("cannot transliterate text of {from} script"))
        } else {
            None
        };

        BatchItem {
            index,
            converted: match (&error, direction) {
                (None, Some(direction)) => Some(self.transliterate(text, direction)),
                _ => None,
            },
            from,
            to,
            error,
        }
    }
}

/// Append `replacement` for the source window `chars[pos..pos + width]`,
/// carrying over its case.
///
/// A lowercase first character leaves the replacement as is. An uppercase
/// first character capitalizes it, or uppercases it entirely when the whole
/// window is uppercase and either spans several letters or touches another
/// uppercase letter (`ШАҲАР` → `SHAHAR`, `Шаҳар` → `Shahar`).
fn push_cased(out: &mut String, replacement: &str, chars: &[char], pos: usize, width: usize) {
    let window = &chars[pos..pos + width];
    let first = window[0];
    if replacement.is_empty() || !first.is_uppercase() {
        out.push_str(replacement);
        return;
    }

    let window_upper = window
        .iter()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    let neighbour_upper = |c: Option<&char>| c.is_some_and(|c| c.is_uppercase());
    let all_upper = window_upper
        && (width > 1
            || neighbour_upper(chars.get(pos + width))
            || neighbour_upper(pos.checked_sub(1).and_then(|p| chars.get(p))));

    if all_upper {
        out.push_str(&upper_case(replacement));
    } else {
        out.push_str(&capitalize(replacement));
    }
}
