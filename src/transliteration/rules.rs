//! Static transliteration tables.
//!
//! Both directions follow the 2016 Karakalpak Latin alphabet, with the Uzbek
//! letters that differ (`ğ`, `ş`, `ç`, `ö`, `ü`, `oʻ`, `gʻ`) accepted on the
//! Latin side. Keys are stored case-folded; the transliterator folds each
//! window before lookup and restores case on the output.

use ahash::AHashMap;
use lazy_static::lazy_static;

/// Single-character and multi-character substitutions for one direction.
#[derive(Debug)]
pub struct RuleSet {
    singles: AHashMap<char, &'static str>,
    sequences: AHashMap<&'static str, &'static str>,
    max_window: usize,
}

impl RuleSet {
    fn new(singles: &[(char, &'static str)], sequences: &[(&'static str, &'static str)]) -> Self {
        let max_window = sequences
            .iter()
            .map(|(from, _)| from.chars().count())
            .max()
            .unwrap_or(1);

        RuleSet {
            singles: singles.iter().copied().collect(),
            sequences: sequences.iter().copied().collect(),
            max_window,
        }
    }

    /// Replacement for a folded character.
    pub fn single(&self, c: char) -> Option<&'static str> {
        self.singles.get(&c).copied()
    }

    /// Replacement for a folded multi-character window.
    pub fn sequence(&self, window: &str) -> Option<&'static str> {
        self.sequences.get(window).copied()
    }

    /// Length in characters of the longest sequence key.
    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Number of single-character rules.
    pub fn singles_len(&self) -> usize {
        self.singles.len()
    }

    /// Number of sequence rules.
    pub fn sequences_len(&self) -> usize {
        self.sequences.len()
    }
}

const CYRILLIC_TO_LATIN: &[(char, &str)] = &[
    ('а', "a"),
    ('ә', "á"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('ғ', "ǵ"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "yo"),
    ('ж', "j"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('қ', "q"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('ң', "ń"),
    ('о', "o"),
    ('ө', "ó"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ү', "ú"),
    ('ў', "w"),
    ('ф', "f"),
    ('х', "x"),
    ('ҳ', "h"),
    ('һ', "h"),
    ('ц', "c"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    ('ъ', ""),
    ('ы', "ı"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

const CYRILLIC_SEQUENCES: &[(&str, &str)] = &[("ьо", "yo"), ("ье", "ye"), ("ъе", "ye")];

const LATIN_TO_CYRILLIC: &[(char, &str)] = &[
    ('a', "а"),
    ('á', "ә"),
    ('ə', "ә"),
    ('b', "б"),
    ('c', "ц"),
    ('ç', "ч"),
    ('d', "д"),
    ('e', "е"),
    ('f', "ф"),
    ('g', "г"),
    ('ǵ', "ғ"),
    ('ğ', "ғ"),
    ('h', "ҳ"),
    ('ı', "ы"),
    ('i', "и"),
    ('j', "ж"),
    ('k', "к"),
    ('l', "л"),
    ('m', "м"),
    ('n', "н"),
    ('ń', "ң"),
    ('o', "о"),
    ('ó', "ө"),
    ('ö', "ө"),
    ('p', "п"),
    ('q', "қ"),
    ('r', "р"),
    ('s', "с"),
    ('ş', "ш"),
    ('t', "т"),
    ('u', "у"),
    ('ú', "ү"),
    ('ü', "ү"),
    ('v', "в"),
    ('w', "ў"),
    ('x', "х"),
    ('y', "й"),
    ('z', "з"),
];

const LATIN_SEQUENCES: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sh", "ш"),
    ("ch", "ч"),
    ("yo", "ё"),
    ("yu", "ю"),
    ("ya", "я"),
    ("o\u{02BB}", "ў"),
    ("g\u{02BB}", "ғ"),
    ("o'", "ў"),
    ("g'", "ғ"),
];

lazy_static! {
    /// Cyrillic to Latin rules.
    pub static ref TO_LATIN: RuleSet = RuleSet::new(CYRILLIC_TO_LATIN, CYRILLIC_SEQUENCES);
    /// Latin to Cyrillic rules.
    pub static ref TO_CYRILLIC: RuleSet = RuleSet::new(LATIN_TO_CYRILLIC, LATIN_SEQUENCES);
}
