//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::script::ScriptStats;
use crate::cli::args::{ImlaArgs, OutputFormat};
use crate::engine::{SpellCheckReport, ValidationReport};
use crate::error::Result;
use crate::spelling::corrector::AutoCorrection;
use crate::spelling::dictionary::DictionaryStats;
use crate::spelling::search::SearchHit;
use crate::transliteration::{AutoTransliteration, BatchItem};

/// Result structure for dictionary export to a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub path: String,
    pub format: String,
    pub words: usize,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    /// Write the result for a terminal.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &ImlaArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args, &mut out),
        OutputFormat::Json => output_json(result, args, &mut out),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(
    message: &str,
    result: &T,
    args: &ImlaArgs,
    out: &mut dyn Write,
) -> Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    result.write_human(out)?;
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ImlaArgs, out: &mut dyn Write) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

impl HumanOutput for SpellCheckReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in self.results.iter().filter(|r| !r.is_correct) {
            let token = &result.token;
            let suggestions: Vec<String> = result
                .suggestions
                .iter()
                .map(|s| format!("{} ({}%)", s.word, s.confidence))
                .collect();
            if suggestions.is_empty() {
                writeln!(out, "{}..{} {}: no suggestions", token.start, token.end, token.text)?;
            } else {
                writeln!(
                    out,
                    "{}..{} {}: {}",
                    token.start,
                    token.end,
                    token.text,
                    suggestions.join(", ")
                )?;
            }
        }

        let stats = &self.statistics;
        writeln!(
            out,
            "{} words, {} correct, {} incorrect, accuracy {:.2}%",
            stats.total_words, stats.correct_words, stats.incorrect_words, stats.accuracy
        )?;
        if self.dictionary.status.is_stale() {
            writeln!(
                out,
                "warning: dictionary reload failed, checked against the snapshot from {}",
                self.dictionary.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for AutoCorrection {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.corrected_text)?;
        for correction in &self.corrections {
            writeln!(
                out,
                "  {} -> {} at {} ({}%)",
                correction.original, correction.corrected, correction.position, correction.confidence
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for AutoTransliteration {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.result)?;
        if !self.confident {
            writeln!(out, "note: script is {}, text left unchanged", self.from)?;
        }
        Ok(())
    }
}

impl HumanOutput for Vec<BatchItem> {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for item in self {
            match (&item.converted, &item.error) {
                (Some(converted), _) => writeln!(out, "{converted}")?,
                (None, Some(error)) => writeln!(out, "#{}: {error}", item.index + 1)?,
                (None, None) => writeln!(out)?,
            }
        }
        Ok(())
    }
}

impl HumanOutput for ScriptStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Script: {}", self.script)?;
        writeln!(out, "Cyrillic letters: {} ({:.1}%)", self.cyrillic, self.cyrillic_percent)?;
        writeln!(out, "Latin letters: {} ({:.1}%)", self.latin, self.latin_percent)?;
        Ok(())
    }
}

impl HumanOutput for Vec<SearchHit> {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.is_empty() {
            writeln!(out, "No matching words")?;
        }
        for hit in self {
            writeln!(
                out,
                "{:<24} {:>3}  {:<8} trust {}",
                hit.word, hit.score, hit.script, hit.trust_score
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ValidationReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for result in &self.results {
            if result.is_valid {
                writeln!(out, "{}: ok", result.word)?;
            } else {
                let suggestions: Vec<&str> =
                    result.suggestions.iter().map(|s| s.word.as_str()).collect();
                writeln!(out, "{}: not found [{}]", result.word, suggestions.join(", "))?;
            }
        }
        let summary = &self.summary;
        writeln!(
            out,
            "{} of {} valid ({:.1}%)",
            summary.valid, summary.total, summary.accuracy
        )?;
        Ok(())
    }
}

impl HumanOutput for DictionaryStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Dictionary Statistics:")?;
        writeln!(out, "══════════════════════")?;
        writeln!(out, "Total words: {}", self.total_words)?;
        writeln!(out, "Latin: {}", self.latin)?;
        writeln!(out, "Cyrillic: {}", self.cyrillic)?;
        writeln!(out, "Mixed: {}", self.mixed)?;
        writeln!(out, "High trust: {}", self.high_trust)?;
        writeln!(
            out,
            "Loaded at: {}",
            self.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }
}

impl HumanOutput for ExportResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Exported {} words to {} ({})", self.words, self.path, self.format)
    }
}
