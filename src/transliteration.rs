//! Cyrillic ↔ Latin transliteration.
//!
//! # Examples
//!
//! ```
//! use imla::transliteration::{Direction, Transliterator};
//!
//! let transliterator = Transliterator::new();
//! assert_eq!(transliterator.transliterate("Қарақалпақ", Direction::ToLatin), "Qaraqalpaq");
//! assert_eq!(transliterator.transliterate("shahar", Direction::ToCyrillic), "шаҳар");
//! ```

pub mod rules;
pub mod transliterator;

pub use rules::{RuleSet, TO_CYRILLIC, TO_LATIN};
pub use transliterator::{
    AutoTransliteration, BatchItem, Direction, TransliterationMode, Transliterator,
};
