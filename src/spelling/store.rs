//! Dictionary stores: where snapshots come from, and where they can go.
//!
//! The index only needs one read call, [`DictionaryStore::load_checked`].
//! Word list files can be plain text, CSV, JSON or JSON Lines; the same
//! formats are used to export a snapshot.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, WriterBuilder};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::script::Script;
use crate::error::{ImlaError, Result};
use crate::spelling::dictionary::{Category, DictionaryEntry, DictionarySnapshot, MAX_TRUST};

/// A read-only source of validated vocabulary.
pub trait DictionaryStore: Send + Sync {
    /// Load every checked entry, highest trust first.
    fn load_checked(&self) -> Result<Vec<DictionaryEntry>>;

    /// Get the name of this store (for logging).
    fn name(&self) -> &'static str;
}

/// A store backed by a vector, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryDictionaryStore {
    entries: RwLock<Vec<DictionaryEntry>>,
}

impl MemoryDictionaryStore {
    /// Create a store holding the given entries.
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        MemoryDictionaryStore {
            entries: RwLock::new(entries),
        }
    }

    /// Create a store of fully trusted words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(DictionaryEntry::trusted).collect())
    }

    /// Add an entry, visible from the next load on.
    pub fn insert(&self, entry: DictionaryEntry) {
        self.entries.write().push(entry);
    }

    /// Replace the whole vocabulary.
    pub fn replace(&self, entries: Vec<DictionaryEntry>) {
        *self.entries.write() = entries;
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DictionaryStore for MemoryDictionaryStore {
    fn load_checked(&self) -> Result<Vec<DictionaryEntry>> {
        let mut entries = self.entries.read().clone();
        entries.sort_by(|a, b| b.trust_score.cmp(&a.trust_score));
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// A store that calls a function for every load.
pub struct FnDictionaryStore<F> {
    load: F,
}

impl<F> FnDictionaryStore<F>
where
    F: Fn() -> Result<Vec<DictionaryEntry>> + Send + Sync,
{
    /// Wrap a loading function.
    pub fn new(load: F) -> Self {
        FnDictionaryStore { load }
    }
}

impl<F> fmt::Debug for FnDictionaryStore<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDictionaryStore").finish_non_exhaustive()
    }
}

impl<F> DictionaryStore for FnDictionaryStore<F>
where
    F: Fn() -> Result<Vec<DictionaryEntry>> + Send + Sync,
{
    fn load_checked(&self) -> Result<Vec<DictionaryEntry>> {
        (self.load)()
    }

    fn name(&self) -> &'static str {
        "function"
    }
}

/// On-disk word list formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordListFormat {
    /// One word per line, `#` starts a comment line.
    Txt,
    /// Header row `word,script,trust_score,category,frequency`.
    Csv,
    /// A JSON array of records.
    Json,
    /// One JSON record per line.
    Jsonl,
}

impl WordListFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ImlaError::invalid_input(format!(
                    "Cannot infer word list format of {}",
                    path.display()
                ))
            })?;
        ext.parse()
    }

    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            WordListFormat::Txt => "txt",
            WordListFormat::Csv => "csv",
            WordListFormat::Json => "json",
            WordListFormat::Jsonl => "jsonl",
        }
    }
}

impl FromStr for WordListFormat {
    type Err = ImlaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(WordListFormat::Txt),
            "csv" => Ok(WordListFormat::Csv),
            "json" => Ok(WordListFormat::Json),
            "jsonl" | "ndjson" => Ok(WordListFormat::Jsonl),
            other => Err(ImlaError::invalid_input(format!(
                "Unknown word list format: {other}"
            ))),
        }
    }
}

impl fmt::Display for WordListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A record as it appears in a word list file. Every field but the word is
/// optional, and unchecked records are skipped on load.
#[derive(Debug, Clone, Deserialize)]
struct WordRecord {
    word: String,
    #[serde(default, alias = "type")]
    script: Option<Script>,
    #[serde(default, alias = "trustScore")]
    trust_score: Option<u8>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    frequency: Option<u32>,
    #[serde(default, alias = "isChecked")]
    checked: Option<bool>,
}

impl WordRecord {
    fn into_entry(self) -> Option<DictionaryEntry> {
        if self.checked == Some(false) {
            return None;
        }
        Some(DictionaryEntry {
            word: self.word,
            script: self.script.unwrap_or(Script::Unknown),
            trust_score: self.trust_score.unwrap_or(MAX_TRUST).min(MAX_TRUST),
            category: self.category,
            frequency: self.frequency.unwrap_or(0),
        })
    }
}

/// Parse a word list from a reader.
pub fn read_word_list<R: Read>(reader: R, format: WordListFormat) -> Result<Vec<DictionaryEntry>> {
    let records: Vec<WordRecord> = match format {
        WordListFormat::Txt => {
            let mut records = Vec::new();
            for line in BufReader::new(reader).lines() {
                let line = line?;
                let word = line.trim();
                if word.is_empty() || word.starts_with('#') {
                    continue;
                }
                records.push(WordRecord {
                    word: word.to_string(),
                    script: None,
                    trust_score: None,
                    category: None,
                    frequency: None,
                    checked: None,
                });
            }
            records
        }
        WordListFormat::Csv => {
            let mut csv_reader = ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(reader);
            let mut records = Vec::new();
            for (row, record) in csv_reader.deserialize::<WordRecord>().enumerate() {
                let record = record.map_err(|e| {
                    ImlaError::parse(format!("Failed to read CSV record {}: {e}", row + 1))
                })?;
                records.push(record);
            }
            records
        }
        WordListFormat::Json => serde_json::from_reader(reader)?,
        WordListFormat::Jsonl => {
            let mut records = Vec::new();
            for (line_num, line) in BufReader::new(reader).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record = serde_json::from_str::<WordRecord>(&line).map_err(|e| {
                    ImlaError::parse(format!("Invalid record on line {}: {e}", line_num + 1))
                })?;
                records.push(record);
            }
            records
        }
    };

    Ok(records.into_iter().filter_map(WordRecord::into_entry).collect())
}

/// A store that re-reads a word list file on every load.
#[derive(Debug, Clone)]
pub struct FileDictionaryStore {
    path: PathBuf,
    format: WordListFormat,
}

impl FileDictionaryStore {
    /// Open a word list, guessing the format from the extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = WordListFormat::from_path(&path)?;
        Ok(FileDictionaryStore { path, format })
    }

    /// Open a word list of a known format.
    pub fn with_format<P: AsRef<Path>>(path: P, format: WordListFormat) -> Self {
        FileDictionaryStore {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Path of the word list.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format of the word list.
    pub fn format(&self) -> WordListFormat {
        self.format
    }
}

impl DictionaryStore for FileDictionaryStore {
    fn load_checked(&self) -> Result<Vec<DictionaryEntry>> {
        let file = File::open(&self.path).map_err(|e| {
            ImlaError::store(format!("Cannot open {}: {e}", self.path.display()))
        })?;
        let mut entries = read_word_list(file, self.format)?;
        entries.sort_by(|a, b| b.trust_score.cmp(&a.trust_score));
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[derive(Serialize)]
struct ExportRow<'a> {
    word: &'a str,
    script: Script,
    trust_score: u8,
    category: &'a str,
    frequency: u32,
}

/// Write a snapshot as a word list, words in alphabetical order.
///
/// Returns the number of words written.
pub fn write_word_list<W: Write>(
    snapshot: &DictionarySnapshot,
    format: WordListFormat,
    writer: W,
) -> Result<usize> {
    write_entries(snapshot.entries(), format, writer)
}

/// Write entries as a word list, words in alphabetical order.
pub fn write_entries<'a, I, W>(entries: I, format: WordListFormat, mut writer: W) -> Result<usize>
where
    I: IntoIterator<Item = &'a DictionaryEntry>,
    W: Write,
{
    let mut entries: Vec<&DictionaryEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.word.cmp(&b.word));

    match format {
        WordListFormat::Txt => {
            for entry in &entries {
                writeln!(writer, "{}", entry.word)?;
            }
        }
        WordListFormat::Csv => {
            let mut csv_writer = WriterBuilder::new().from_writer(&mut writer);
            for entry in &entries {
                csv_writer
                    .serialize(ExportRow {
                        word: &entry.word,
                        script: entry.script,
                        trust_score: entry.trust_score,
                        category: entry.category.map(Category::as_str).unwrap_or(""),
                        frequency: entry.frequency,
                    })
                    .map_err(|e| ImlaError::parse(format!("Failed to write CSV record: {e}")))?;
            }
            csv_writer.flush()?;
        }
        WordListFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &entries)?;
            writeln!(writer)?;
        }
        WordListFormat::Jsonl => {
            for entry in &entries {
                serde_json::to_writer(&mut writer, entry)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(entries.len())
}
