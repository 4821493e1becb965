//! Word tokens with byte spans into the original text.
//!
//! A [`Token`] keeps the word exactly as it was written, its normalized form
//! for dictionary lookup, and the byte range it occupies. The byte range is
//! what the auto-corrector slices with, so `&text[token.start..token.end]`
//! always reproduces `token.text`.
//!
//! # Examples
//!
//! ```
//! use imla::analysis::token::Token;
//!
//! let text = "men Salam aytaman";
//! let token = Token::new("Salam", 1, 4, 9);
//! assert_eq!(token.normalized, "salam");
//! assert_eq!(token.span_of(text), Some("Salam"));
//! assert_eq!(token.byte_len(), 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;

/// A single word of the input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The word as written, original casing preserved.
    pub text: String,

    /// The normalized form used for lookup.
    pub normalized: String,

    /// Ordinal of the token in its sequence (0-based).
    pub position: usize,

    /// Byte offset where this token starts in the original text.
    pub start: usize,

    /// Byte offset one past the end of this token in the original text.
    pub end: usize,
}

impl Token {
    /// Create a token, deriving its normalized form.
    pub fn new<S: Into<String>>(text: S, position: usize, start: usize, end: usize) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        Token {
            text,
            normalized,
            position,
            start,
            end,
        }
    }

    /// Length of the span in bytes.
    pub fn byte_len(&self) -> usize {
        self.end - self.start
    }

    /// Length of the written word in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether normalization left nothing to check.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Slice this token's span out of the text it was produced from.
    pub fn span_of<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.text, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("Dúnya!", 0, 0, 7);
        assert_eq!(token.text, "Dúnya!");
        assert_eq!(token.normalized, "dúnya");
        assert_eq!(token.byte_len(), 7);
        assert_eq!(token.char_len(), 6);
        assert!(!token.is_blank());
    }

    #[test]
    fn test_blank_token() {
        let token = Token::new("...", 0, 0, 3);
        assert!(token.is_blank());
    }

    #[test]
    fn test_span_of_multibyte() {
        let text = "сәлем дүнья";
        let token = Token::new("дүнья", 1, 11, 21);
        assert_eq!(token.span_of(text), Some("дүнья"));
        assert_eq!(token.span_of("short"), None);
    }

    #[test]
    fn test_display() {
        let token = Token::new("salam", 0, 4, 9);
        assert_eq!(token.to_string(), "salam@4..9");
    }
}
