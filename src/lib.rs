//! # imla
//!
//! Spell checking, suggestion and Cyrillic ↔ Latin transliteration for
//! Karakalpak and Uzbek text.
//!
//! ## Features
//!
//! - Script detection for Cyrillic, Latin and mixed text
//! - Dictionary lookup with bounded edit-distance suggestions
//! - Auto-correction that keeps the case of the replaced word
//! - Rule-based transliteration in both directions
//! - A time-limited dictionary cache that keeps serving on reload failures
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use imla::prelude::*;
//!
//! let store = MemoryDictionaryStore::from_words(["men", "salam", "aytaman"]);
//! let imla = Imla::new(Arc::new(store));
//!
//! let fixed = imla.auto_correct("Men salm aytaman").unwrap();
//! assert_eq!(fixed.corrected_text, "Men salam aytaman");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod spelling;
pub mod transliteration;

pub mod prelude {
    pub use crate::analysis::{Script, ScriptDetector, ScriptStats, Token, Tokenizer};
    pub use crate::config::ImlaConfig;
    pub use crate::engine::{Imla, SpellCheckReport, ValidationReport};
    pub use crate::error::{ImlaError, Result};
    pub use crate::spelling::{
        AutoCorrection, DictionaryEntry, DictionarySnapshot, DictionaryStore,
        FileDictionaryStore, MemoryDictionaryStore, SpellChecker, Suggestion, WordListFormat,
    };
    pub use crate::transliteration::{Direction, TransliterationMode, Transliterator};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
