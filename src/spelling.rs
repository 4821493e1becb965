//! Spell checking and suggestion for Karakalpak and Uzbek text.
//!
//! This module owns the vocabulary side of the crate: dictionary entries and
//! immutable snapshots, the stores they are loaded from, the caching
//! [`DictionaryIndex`](index::DictionaryIndex), bounded edit distance, the
//! two-phase suggestion search, the token checker and the auto-corrector.

pub mod checker;
pub mod clock;
pub mod corrector;
pub mod dictionary;
pub mod index;
pub mod levenshtein;
pub mod search;
pub mod store;
pub mod suggest;

pub use checker::{SpellChecker, SpellResult, TextStatistics, WordValidation};
pub use clock::{Clock, ManualClock, SystemClock};
pub use corrector::{AutoCorrection, AutoCorrector, Correction};
pub use dictionary::{Category, DictionaryEntry, DictionarySnapshot, DictionaryStats};
pub use index::{DictionaryIndex, SnapshotHandle, SnapshotInfo, SnapshotStatus};
pub use levenshtein::{distance, levenshtein_distance};
pub use search::{MatchKind, SearchHit, WordSearch};
pub use store::{
    DictionaryStore, FileDictionaryStore, FnDictionaryStore, MemoryDictionaryStore,
    WordListFormat,
};
pub use suggest::{Suggestion, SuggestionConfig, SuggestionEngine, SuggestionKind};
