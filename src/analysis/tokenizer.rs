//! Regex-based word tokenizer for both alphabets.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::token::Token;
use crate::error::{ImlaError, Result};

/// Letters of both alphabets, including the Karakalpak and Uzbek extensions.
const LETTERS: &str = "A-Za-zÁáǴǵıÍíİŃńÓóÚúĞğŞşÖöÜüÇçƏəА-Яа-яЁёӘәҒғҚқҢңӨөҮүЎўҲҳҺһ";

/// Modifier apostrophes allowed after the first letter (`oʻzbek`).
const APOSTROPHES: &str = "\u{02BB}\u{02BC}";

lazy_static! {
    /// The default word pattern: a letter followed by letters, apostrophes or
    /// combining marks, so a decomposed `u` + U+0301 stays inside its word.
    pub static ref WORD_PATTERN: String =
        format!(r"[{LETTERS}][{LETTERS}{APOSTROPHES}\p{{Mn}}]*");
    static ref DEFAULT_REGEX: Arc<Regex> =
        Arc::new(Regex::new(&WORD_PATTERN).expect("word pattern is a valid regex"));
}

/// Splits text into word tokens with byte offsets.
///
/// Anything that is not a word character (spaces, punctuation, digits,
/// symbols) separates tokens. Tokens are produced eagerly, in order, and
/// never overlap.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pattern: Arc<Regex>,
}

impl Tokenizer {
    /// Create a tokenizer with the default word pattern.
    pub fn new() -> Self {
        Tokenizer {
            pattern: Arc::clone(&DEFAULT_REGEX),
        }
    }

    /// Create a tokenizer with a custom word pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ImlaError::invalid_input(format!("Invalid regex pattern: {e}")))?;

        Ok(Tokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Tokenize text into words, in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .filter(|mat| !mat.is_empty())
            .enumerate()
            .map(|(position, mat)| Token::new(mat.as_str(), position, mat.start(), mat.end()))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
