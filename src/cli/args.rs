//! Command line argument parsing for the imla CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::script::Script;
use crate::spelling::store::WordListFormat;
use crate::transliteration::TransliterationMode;

/// imla - Karakalpak spell checker and Cyrillic/Latin transliterator
#[derive(Parser, Debug, Clone)]
#[command(name = "imla")]
#[command(about = "Karakalpak spell checker and Cyrillic/Latin transliterator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ImlaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Word list file (txt, csv, json or jsonl)
    #[arg(short, long, env = "IMLA_DICTIONARY", global = true, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long, env = "IMLA_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ImlaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check the spelling of a text
    Check(CheckArgs),

    /// Replace confidently misspelled words
    Correct(CorrectArgs),

    /// Transliterate between Cyrillic and Latin
    Convert(ConvertArgs),

    /// Detect the script of a text
    Detect(DetectArgs),

    /// Search the dictionary for similar words
    Search(SearchArgs),

    /// Validate standalone words
    Validate(ValidateArgs),

    /// Show dictionary statistics
    Stats,

    /// Export the dictionary as a word list
    Export(ExportArgs),
}

/// Where the text to process comes from. Without a text or a file, standard
/// input is read.
#[derive(Args, Debug, Clone, Default)]
pub struct TextInput {
    /// Text to process
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for spell checking
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Only list incorrect words
    #[arg(long)]
    pub errors_only: bool,
}

/// Arguments for auto-correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Minimum suggestion confidence for a replacement (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,
}

/// Arguments for transliteration
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Conversion mode
    #[arg(short = 'm', long, default_value = "auto")]
    pub mode: ModeArg,

    /// Convert every line as a separate batch item
    #[arg(long)]
    pub lines: bool,
}

/// Arguments for script detection
#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for dictionary search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for word validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Words to validate
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for dictionary export
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Word list format
    #[arg(long = "as", default_value = "txt")]
    pub export_format: ExportFormat,

    /// Only export words of this script
    #[arg(short, long)]
    pub script: Option<ScriptArg>,

    /// Output file (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Conversion modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeArg {
    /// Detect the script and convert to the other one
    Auto,
    /// Cyrillic to Latin
    ToLatin,
    /// Latin to Cyrillic
    ToCyrillic,
}

impl From<ModeArg> for TransliterationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => TransliterationMode::Auto,
            ModeArg::ToLatin => TransliterationMode::ToLatin,
            ModeArg::ToCyrillic => TransliterationMode::ToCyrillic,
        }
    }
}

/// Word list formats for export
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One word per line
    Txt,
    /// CSV with header
    Csv,
    /// JSON array
    Json,
    /// JSON Lines
    Jsonl,
}

impl From<ExportFormat> for WordListFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Txt => WordListFormat::Txt,
            ExportFormat::Csv => WordListFormat::Csv,
            ExportFormat::Json => WordListFormat::Json,
            ExportFormat::Jsonl => WordListFormat::Jsonl,
        }
    }
}

/// Scripts selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptArg {
    /// Latin words
    Latin,
    /// Cyrillic words
    Cyrillic,
    /// Mixed-script words
    Mixed,
}

impl From<ScriptArg> for Script {
    fn from(script: ScriptArg) -> Self {
        match script {
            ScriptArg::Latin => Script::Latin,
            ScriptArg::Cyrillic => Script::Cyrillic,
            ScriptArg::Mixed => Script::Mixed,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_check_command() {
        let args = ImlaArgs::try_parse_from([
            "imla",
            "--dictionary",
            "words.txt",
            "check",
            "men salm aytaman",
        ])
        .unwrap();

        assert_eq!(args.dictionary, Some(PathBuf::from("words.txt")));
        if let Command::Check(check_args) = args.command {
            assert_eq!(check_args.input.text.as_deref(), Some("men salm aytaman"));
            assert!(check_args.input.file.is_none());
            assert!(!check_args.errors_only);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_convert_command() {
        let args =
            ImlaArgs::try_parse_from(["imla", "convert", "қала", "--mode", "to-latin", "-f", "json"])
                .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Convert(convert_args) = args.command {
            assert_eq!(convert_args.mode, ModeArg::ToLatin);
            assert_eq!(
                TransliterationMode::from(convert_args.mode),
                TransliterationMode::ToLatin
            );
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_correct_threshold_range() {
        let args = ImlaArgs::try_parse_from(["imla", "correct", "salm", "--threshold", "80"]).unwrap();
        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.threshold, Some(80));
        } else {
            panic!("Expected Correct command");
        }

        assert!(ImlaArgs::try_parse_from(["imla", "correct", "salm", "--threshold", "101"]).is_err());
    }

    #[test]
    fn test_validate_requires_words() {
        assert!(ImlaArgs::try_parse_from(["imla", "validate"]).is_err());

        let args = ImlaArgs::try_parse_from(["imla", "validate", "salam", "dúnya"]).unwrap();
        if let Command::Validate(validate_args) = args.command {
            assert_eq!(validate_args.words, vec!["salam", "dúnya"]);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_export_command() {
        let args = ImlaArgs::try_parse_from([
            "imla", "export", "--as", "csv", "--script", "latin", "-o", "out.csv",
        ])
        .unwrap();
        if let Command::Export(export_args) = args.command {
            assert_eq!(WordListFormat::from(export_args.export_format), WordListFormat::Csv);
            assert_eq!(export_args.script.map(Script::from), Some(Script::Latin));
            assert_eq!(export_args.output, Some(PathBuf::from("out.csv")));
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ImlaArgs::try_parse_from(["imla", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ImlaArgs::try_parse_from(["imla", "-vvv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = ImlaArgs::try_parse_from(["imla", "-q", "-vv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
