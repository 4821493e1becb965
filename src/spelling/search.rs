//! Fuzzy lookup of vocabulary words.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::analysis::script::Script;
use crate::spelling::dictionary::DictionarySnapshot;
use crate::spelling::levenshtein::distance_within;

/// Default number of search hits.
pub const DEFAULT_LIMIT: usize = 10;

/// Shortest normalized query, in characters, that is searched.
pub const MIN_QUERY_CHARS: usize = 2;

/// How a search hit matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The word contains the query.
    Exact,
    /// The word is within the edit distance budget of the query.
    Similar,
}

/// A vocabulary word matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The word as stored.
    pub word: String,
    /// Script of the word.
    pub script: Script,
    /// Trust score of the word.
    pub trust_score: u8,
    /// How the word matched.
    pub kind: MatchKind,
    /// 100 for words containing the query, `100 - 20 * distance` otherwise.
    pub score: u8,
}

/// Substring and edit distance search over a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct WordSearch {
    max_distance: u32,
}

impl Default for WordSearch {
    fn default() -> Self {
        WordSearch { max_distance: 3 }
    }
}

impl WordSearch {
    /// Create a search with the default distance budget of 3.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find up to `limit` words matching `query`, best first.
    ///
    /// Ties on score are broken by trust, then alphabetically. A query that
    /// normalizes to fewer than [`MIN_QUERY_CHARS`] characters matches nothing.
    pub fn search(&self, query: &str, snapshot: &DictionarySnapshot, limit: usize) -> Vec<SearchHit> {
        let query = normalize(query);
        if query.chars().count() < MIN_QUERY_CHARS || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = snapshot
            .iter()
            .filter_map(|(key, entry)| {
                let (kind, score) = if key.contains(query.as_str()) {
                    (MatchKind::Exact, 100)
                } else {
                    let d = distance_within(&query, key, self.max_distance)?;
                    (MatchKind::Similar, 100u32.saturating_sub(d * 20) as u8)
                };
                Some(SearchHit {
                    word: entry.word.clone(),
                    script: entry.script,
                    trust_score: entry.trust_score,
                    kind,
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.trust_score.cmp(&a.trust_score))
                .then_with(|| a.word.cmp(&b.word))
        });
        hits.truncate(limit);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::dictionary::DictionaryEntry;
    use chrono::Utc;

    fn snapshot() -> DictionarySnapshot {
        DictionarySnapshot::build(
            vec![
                DictionaryEntry::new("kitap", Script::Latin, 100),
                DictionaryEntry::new("kitapxana", Script::Latin, 80),
                DictionaryEntry::new("kitaplar", Script::Latin, 95),
                DictionaryEntry::new("qatar", Script::Latin, 100),
                DictionaryEntry::new("китап", Script::Cyrillic, 100),
            ],
            Utc::now(),
            1,
        )
    }

    #[test]
    fn test_exact_hits_first() {
        let hits = WordSearch::new().search("Kitap", &snapshot(), DEFAULT_LIMIT);
        let words: Vec<&str> = hits.iter().map(|h| h.word.as_str()).collect();
        assert_eq!(words, vec!["kitap", "kitaplar", "kitapxana", "qatar"]);
        assert!(hits[..3].iter().all(|h| h.kind == MatchKind::Exact && h.score == 100));
        assert_eq!(hits[3].kind, MatchKind::Similar);
        assert_eq!(hits[3].score, 40);
    }

    #[test]
    fn test_similar_hits() {
        let hits = WordSearch::new().search("kitob", &snapshot(), DEFAULT_LIMIT);
        assert_eq!(hits[0].word, "kitap");
        assert_eq!(hits[0].kind, MatchKind::Similar);
        assert_eq!(hits[0].score, 60);
    }

    #[test]
    fn test_limit_and_empty_query() {
        let search = WordSearch::new();
        assert_eq!(search.search("kitap", &snapshot(), 2).len(), 2);
        assert!(search.search("...", &snapshot(), DEFAULT_LIMIT).is_empty());
        assert!(search.search("k", &snapshot(), DEFAULT_LIMIT).is_empty());
        assert!(!search.search("ki", &snapshot(), DEFAULT_LIMIT).is_empty());
        assert!(search.search("kitap", &snapshot(), 0).is_empty());
    }
}
