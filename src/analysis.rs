//! Text analysis for Karakalpak and Uzbek text in either script.
//!
//! This module turns raw text into comparable units: script-aware case folding
//! ([`normalizer`]), script classification ([`script`]) and word tokenization
//! with byte offsets ([`tokenizer`]).

pub mod normalizer;
pub mod script;
pub mod token;
pub mod tokenizer;

pub use normalizer::normalize;
pub use script::{Script, ScriptDetector, ScriptStats};
pub use token::Token;
pub use tokenizer::Tokenizer;
