//! Command implementations for the imla CLI.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::sync::Arc;

use log::{LevelFilter, debug, info};

use crate::analysis::script::Script;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ImlaConfig;
use crate::engine::Imla;
use crate::error::{ImlaError, Result};
use crate::spelling::store::{
    DictionaryStore, FileDictionaryStore, MemoryDictionaryStore, WordListFormat,
};
use crate::transliteration::{AutoTransliteration, Direction, TransliterationMode};

/// Execute a CLI command.
pub fn execute_command(args: ImlaArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Check(check_args) => check_text(check_args, &args, config),
        Command::Correct(correct_args) => correct_text(correct_args, &args, config),
        Command::Convert(convert_args) => convert_text(convert_args, &args, config),
        Command::Detect(detect_args) => detect_script(detect_args, &args, config),
        Command::Search(search_args) => search_words(search_args, &args, config),
        Command::Validate(validate_args) => validate_words(validate_args, &args, config),
        Command::Stats => show_stats(&args, config),
        Command::Export(export_args) => export_dictionary(export_args, &args, config),
    }
}

/// Log level for a verbosity count: errors only when quiet, warnings by
/// default, then info and debug.
pub fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Process exit code for a failed command.
pub fn exit_code(error: &ImlaError) -> i32 {
    match error {
        ImlaError::InvalidInput(_) | ImlaError::Config(_) => 2,
        ImlaError::DictionaryUnavailable(_) | ImlaError::Store(_) | ImlaError::Parse(_) => 3,
        ImlaError::Io(_) => 4,
        ImlaError::Json(_) | ImlaError::Anyhow(_) => 1,
    }
}

/// Load the configuration file, or the defaults without one.
fn load_config(args: &ImlaArgs) -> Result<ImlaConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            ImlaConfig::from_file(path)
        }
        None => Ok(ImlaConfig::default()),
    }
}

/// Build an engine over the word list given on the command line.
fn open_engine(args: &ImlaArgs, config: ImlaConfig) -> Result<Imla> {
    let path = args.dictionary.as_ref().ok_or_else(|| {
        ImlaError::invalid_input("No dictionary given. Use --dictionary or set IMLA_DICTIONARY.")
    })?;
    info!("Using dictionary {}", path.display());
    let store: Arc<dyn DictionaryStore> = Arc::new(FileDictionaryStore::open(path)?);
    Ok(Imla::with_config(store, config))
}

/// Build an engine for commands that never look words up.
fn engine_without_dictionary(config: ImlaConfig) -> Imla {
    Imla::with_config(Arc::new(MemoryDictionaryStore::default()), config)
}

/// Read the text argument, the file argument, or standard input.
fn read_input(input: &TextInput) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return fs::read_to_string(path).map_err(|e| {
            ImlaError::invalid_input(format!("Cannot read {}: {e}", path.display()))
        });
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Check the spelling of a text.
fn check_text(check_args: &CheckArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let text = read_input(&check_args.input)?;
    let imla = open_engine(args, config)?;

    let mut report = imla.check_text(&text)?;
    if check_args.errors_only {
        report.results.retain(|r| !r.is_correct);
    }

    output_result("Spell check", &report, args)
}

/// Replace confidently misspelled words.
fn correct_text(correct_args: &CorrectArgs, args: &ImlaArgs, mut config: ImlaConfig) -> Result<()> {
    let text = read_input(&correct_args.input)?;
    if let Some(threshold) = correct_args.threshold {
        config.spelling.auto_correct_threshold = threshold;
    }
    debug!(
        "Auto-correcting with threshold {}",
        config.spelling.auto_correct_threshold
    );
    let imla = open_engine(args, config)?;

    let correction = imla.auto_correct(&text)?;
    output_result("Auto-correction", &correction, args)
}

/// Transliterate a text, or every line of it as a batch.
fn convert_text(convert_args: &ConvertArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let text = read_input(&convert_args.input)?;
    let imla = engine_without_dictionary(config);
    let mode = TransliterationMode::from(convert_args.mode);

    if convert_args.lines {
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        let items = imla.transliterate_batch(&lines, mode)?;
        return output_result("Batch transliteration", &items, args);
    }

    let text = text.trim_end_matches(['\r', '\n']);
    let result = match mode {
        TransliterationMode::Auto => imla.auto_transliterate(text)?,
        TransliterationMode::ToLatin => forced(&imla, text, Direction::ToLatin)?,
        TransliterationMode::ToCyrillic => forced(&imla, text, Direction::ToCyrillic)?,
    };
    output_result("Transliteration", &result, args)
}

fn forced(imla: &Imla, text: &str, direction: Direction) -> Result<AutoTransliteration> {
    Ok(AutoTransliteration {
        result: imla.transliterate(text, direction)?,
        from: direction.source(),
        to: direction.target(),
        confident: true,
    })
}

/// Detect the script of a text.
fn detect_script(detect_args: &DetectArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let text = read_input(&detect_args.input)?;
    let imla = engine_without_dictionary(config);
    let stats = imla.detect_script(&text)?;
    output_result("Script detection", &stats, args)
}

/// Search the dictionary.
fn search_words(search_args: &SearchArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let imla = open_engine(args, config)?;
    let hits = imla.search_words(&search_args.query, search_args.limit)?;
    output_result("Search results", &hits, args)
}

/// Validate standalone words.
fn validate_words(validate_args: &ValidateArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let imla = open_engine(args, config)?;
    let report = imla.validate_words(&validate_args.words)?;
    output_result("Word validation", &report, args)
}

/// Show dictionary statistics.
fn show_stats(args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let imla = open_engine(args, config)?;
    let stats = imla.dictionary_stats()?;
    output_result("Dictionary statistics", &stats, args)
}

/// Export the dictionary to a file or standard output.
fn export_dictionary(export_args: &ExportArgs, args: &ImlaArgs, config: ImlaConfig) -> Result<()> {
    let imla = open_engine(args, config)?;
    let format: WordListFormat = export_args.export_format.into();
    let script: Option<Script> = export_args.script.map(Into::into);

    match &export_args.output {
        Some(path) => {
            let file = File::create(path)?;
            let words = imla.export_dictionary(format, script, BufWriter::new(file))?;
            output_result(
                "Dictionary exported",
                &ExportResult {
                    path: path.display().to_string(),
                    format: format.to_string(),
                    words,
                },
                args,
            )
        }
        None => {
            let stdout = io::stdout();
            imla.export_dictionary(format, script, stdout.lock())?;
            Ok(())
        }
    }
}
