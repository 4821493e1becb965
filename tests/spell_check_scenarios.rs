use std::io::Write;
use std::sync::Arc;

use imla::analysis::Script;
use imla::engine::Imla;
use imla::error::Result;
use imla::transliteration::Direction;
use imla::spelling::{
    DictionaryEntry, DictionaryStore, FileDictionaryStore, MemoryDictionaryStore, SuggestionKind,
};

fn engine(words: &[&str]) -> Imla {
    let store: Arc<dyn DictionaryStore> = Arc::new(MemoryDictionaryStore::from_words(
        words.iter().map(|w| w.to_string()),
    ));
    Imla::new(store)
}

#[test]
fn known_words_are_correct_without_suggestions() -> Result<()> {
    let imla = engine(&["salam", "dunya"]);

    let report = imla.check_text("salam dunya")?;
    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert!(result.is_correct, "{} should be correct", result.token.text);
        assert!(result.suggestions.is_empty());
    }
    assert_eq!(report.statistics.total_words, 2);
    assert_eq!(report.statistics.accuracy, 100.0);
    Ok(())
}

#[test]
fn misspelled_word_gets_edit_distance_suggestion() -> Result<()> {
    let imla = engine(&["salam"]);

    let report = imla.check_text("salm")?;
    let result = &report.results[0];
    assert!(!result.is_correct);

    let suggestion = result
        .suggestions
        .iter()
        .find(|s| s.word == "salam")
        .expect("salam should be suggested");
    assert_eq!(suggestion.distance, 1);
    assert_eq!(suggestion.confidence, 75);
    assert_eq!(suggestion.kind, SuggestionKind::EditDistance);
    Ok(())
}

#[test]
fn auto_correct_replaces_confident_suggestion() -> Result<()> {
    let imla = engine(&["men", "salam", "aytaman"]);

    let correction = imla.auto_correct("men salm aytaman")?;
    assert_eq!(correction.corrected_text, "men salam aytaman");
    assert_eq!(correction.corrections.len(), 1);

    let first = &correction.corrections[0];
    assert_eq!(first.original, "salm");
    assert_eq!(first.corrected, "salam");
    assert_eq!(first.position, 4);
    Ok(())
}

#[test]
fn auto_correct_keeps_case_and_punctuation() -> Result<()> {
    let imla = engine(&["salam", "dunya"]);

    let correction = imla.auto_correct("Salm, dunya!")?;
    assert_eq!(correction.corrected_text, "Salam, dunya!");
    Ok(())
}

#[test]
fn short_mixed_text_is_not_forced_into_one_script() -> Result<()> {
    let imla = engine(&[]);

    let stats = imla.detect_script("Hello мир")?;
    assert_eq!(stats.script, Script::Mixed);
    assert_eq!(stats.latin, 5);
    assert_eq!(stats.cyrillic, 3);
    Ok(())
}

#[test]
fn cyrillic_text_checks_against_cyrillic_words() -> Result<()> {
    let store = MemoryDictionaryStore::new(vec![
        DictionaryEntry::new("қала", Script::Cyrillic, 100),
        DictionaryEntry::new("qala", Script::Latin, 100),
    ]);
    let imla = Imla::new(Arc::new(store));

    let report = imla.check_text("Қала қаласы")?;
    assert!(report.results[0].is_correct);
    assert!(!report.results[1].is_correct);
    assert!(
        report.results[1]
            .suggestions
            .iter()
            .all(|s| s.word != "qala")
    );
    Ok(())
}

#[test]
fn file_dictionary_serves_checks() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    writeln!(file, "word,script,trust_score")?;
    writeln!(file, "kitap,latin,100")?;
    writeln!(file, "mektep,latin,95")?;
    file.flush()?;

    let imla = Imla::new(Arc::new(FileDictionaryStore::open(file.path())?));
    let report = imla.check_text("kitap mektp")?;
    assert!(report.results[0].is_correct);
    assert_eq!(report.results[1].suggestions[0].word, "mektep");
    assert_eq!(imla.dictionary_stats()?.total_words, 2);
    Ok(())
}

#[test]
fn decomposed_accents_are_composed_before_processing() -> Result<()> {
    let imla = engine(&["dúnya", "ǵárezsizlik", "salam"]);

    let report = imla.check_text("du\u{301}nya g\u{301}a\u{301}rezsizlik")?;
    let tokens: Vec<(&str, bool)> = report
        .results
        .iter()
        .map(|r| (r.token.text.as_str(), r.is_correct))
        .collect();
    assert_eq!(tokens, vec![("dúnya", true), ("ǵárezsizlik", true)]);

    let correction = imla.auto_correct("Salm du\u{301}nya")?;
    assert_eq!(correction.corrected_text, "Salam dúnya");
    assert_eq!(correction.corrections.len(), 1);

    assert_eq!(
        imla.transliterate("g\u{301}alaba", Direction::ToCyrillic)?,
        "ғалаба"
    );
    Ok(())
}

#[test]
fn short_token_gets_substring_suggestion() -> Result<()> {
    let imla = engine(&["salam"]);

    let report = imla.check_text("sa")?;
    let suggestion = &report.results[0].suggestions[0];
    assert_eq!(suggestion.word, "salam");
    assert_eq!(suggestion.distance, 0);
    assert_eq!(suggestion.confidence, 95);
    assert_eq!(suggestion.kind, SuggestionKind::Substring);
    Ok(())
}
