//! Script-aware case folding and word normalization.
//!
//! Both alphabets are folded with Unicode lowercase rules, except where the
//! Karakalpak Latin orthography pairs letters differently: the capital of `ı`
//! is `Í`, so `Í` (and the look-alike `í`) fold to `ı`, and the Turkish `İ`
//! folds to a plain `i` instead of `i` plus a combining dot.
//!
//! Accented letters may arrive decomposed (`u` + U+0301). Text is composed to
//! NFC first, so `dúnya` compares equal however it was typed.
//!
//! # Examples
//!
//! ```
//! use imla::analysis::normalizer::normalize;
//!
//! assert_eq!(normalize("Qaraqalpaq!"), "qaraqalpaq");
//! assert_eq!(normalize("ҚАРАҚАЛПАҚ"), "қарақалпақ");
//! assert_eq!(normalize("Ízbasar"), "ızbasar");
//! assert_eq!(normalize("du\u{301}nya"), "dúnya");
//! assert_eq!(normalize(""), "");
//! ```

use std::borrow::Cow;

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

/// Modifier letters used as apostrophes inside Uzbek words (`oʻ`, `gʻ`, `maʼno`).
pub const WORD_APOSTROPHES: [char; 2] = ['\u{02BB}', '\u{02BC}'];

/// Compose `text` to NFC. Already composed text is borrowed as is.
pub fn compose(text: &str) -> Cow<'_, str> {
    match is_nfc_quick(text.chars()) {
        IsNormalized::Yes => Cow::Borrowed(text),
        _ => Cow::Owned(text.nfc().collect()),
    }
}

/// Check whether a character is a Latin letter of the target orthographies.
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(
            c,
            'á' | 'Á'
                | 'ǵ'
                | 'Ǵ'
                | 'ı'
                | 'Í'
                | 'í'
                | 'İ'
                | 'ń'
                | 'Ń'
                | 'ó'
                | 'Ó'
                | 'ú'
                | 'Ú'
                | 'ğ'
                | 'Ğ'
                | 'ş'
                | 'Ş'
                | 'ö'
                | 'Ö'
                | 'ü'
                | 'Ü'
                | 'ç'
                | 'Ç'
                | 'ə'
                | 'Ə'
        )
}

/// Check whether a character is a Cyrillic letter of the target orthographies.
pub fn is_cyrillic_letter(c: char) -> bool {
    matches!(
        c,
        'а'..='я'
            | 'А'..='Я'
            | 'ё'
            | 'Ё'
            | 'ә'
            | 'Ә'
            | 'ғ'
            | 'Ғ'
            | 'қ'
            | 'Қ'
            | 'ң'
            | 'Ң'
            | 'ө'
            | 'Ө'
            | 'ү'
            | 'Ү'
            | 'ў'
            | 'Ў'
            | 'ҳ'
            | 'Ҳ'
            | 'һ'
            | 'Һ'
    )
}

/// Check whether a character may appear in a normalized word.
pub fn is_word_char(c: char) -> bool {
    is_latin_letter(c) || is_cyrillic_letter(c) || WORD_APOSTROPHES.contains(&c)
}

/// Fold a single character to its lowercase form.
pub fn fold_char(c: char) -> char {
    match c {
        'Í' | 'í' => 'ı',
        'İ' => 'i',
        _ => single(c.to_lowercase(), c),
    }
}

/// Map a single character to its uppercase form.
pub fn upper_char(c: char) -> char {
    match c {
        'ı' => 'Í',
        'i' => 'I',
        _ => single(c.to_uppercase(), c),
    }
}

fn single<I: Iterator<Item = char>>(mut mapped: I, fallback: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(only), None) => only,
        _ => fallback,
    }
}

/// Lowercase a string with the script-aware folding rules.
pub fn fold_case(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Uppercase a string with the script-aware rules.
pub fn upper_case(s: &str) -> String {
    s.chars().map(upper_char).collect()
}

/// Uppercase the first character of a string, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(s.len() + 1);
            out.push(upper_char(first));
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Canonicalize a word for comparison: compose, fold case, then drop every
/// character that is not a letter of either script or a word apostrophe.
pub fn normalize(word: &str) -> String {
    compose(word)
        .chars()
        .map(fold_char)
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Capitalization pattern of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseShape {
    /// All letters lowercase (or no letters at all).
    Lower,
    /// First letter uppercase, the rest lowercase.
    Capitalized,
    /// Every letter uppercase, at least two letters.
    Upper,
    /// Anything else, e.g. `McDonald`.
    Mixed,
}

impl CaseShape {
    /// Classify the capitalization of a word.
    pub fn of(word: &str) -> Self {
        let mut letters = word.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return CaseShape::Lower;
        };

        let mut rest_upper = 0usize;
        let mut rest_lower = 0usize;
        for c in letters {
            if c.is_uppercase() {
                rest_upper += 1;
            } else {
                rest_lower += 1;
            }
        }

        match (first.is_uppercase(), rest_upper, rest_lower) {
            (false, 0, _) => CaseShape::Lower,
            (true, 0, _) => CaseShape::Capitalized,
            (true, _, 0) => CaseShape::Upper,
            _ => CaseShape::Mixed,
        }
    }

    /// Re-case a lowercase word to this shape. `Mixed` leaves it as is.
    pub fn apply(self, word: &str) -> String {
        match self {
            CaseShape::Lower | CaseShape::Mixed => word.to_string(),
            CaseShape::Capitalized => capitalize(word),
            CaseShape::Upper => upper_case(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_digits() {
        assert_eq!(normalize("«Salam!»"), "salam");
        assert_eq!(normalize("dúnya,"), "dúnya");
        assert_eq!(normalize("2024-jıl"), "jıl");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_extended_letters() {
        assert_eq!(normalize("ǴÁRREZSIZ"), "ǵárrezsiz");
        assert_eq!(normalize("ӘҒҚҢӨҮЎҲ"), "әғқңөүўҳ");
        assert_eq!(normalize("İstanbul"), "istanbul");
        assert_eq!(normalize("QÍZ"), "qız");
        assert_eq!(normalize("Oʻzbekiston"), "oʻzbekiston");
    }

    #[test]
    fn test_normalize_composes_accents() {
        assert_eq!(normalize("du\u{301}nya"), "dúnya");
        assert_eq!(normalize("G\u{301}A\u{301}REZSIZLIK"), "ǵárezsizlik");
        assert_eq!(normalize("n\u{301}"), normalize("ń"));
    }

    #[test]
    fn test_compose_borrows_composed_text() {
        assert!(matches!(compose("dúnya"), Cow::Borrowed(_)));
        let composed = compose("o\u{301}zbek");
        assert!(matches!(composed, Cow::Owned(_)));
        assert_eq!(composed, "ózbek");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "Salam, Dúnya!",
            "ҚАРАҚАЛПАҚСТАН Республикасы",
            "İÍíı Iı",
            "Oʻzbek tili 123 ... ???",
            "ǴǵŃńÓóÚúÁá",
            "Ёлка ЎҚҒҲ",
            "du\u{301}nya g\u{301}a\u{301}rez",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_upper_char_dotless_i() {
        assert_eq!(upper_char('ı'), 'Í');
        assert_eq!(upper_char('i'), 'I');
        assert_eq!(upper_char('ş'), 'Ş');
        assert_eq!(upper_char('қ'), 'Қ');
        assert_eq!(fold_char(upper_char('ı')), 'ı');
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sh"), "Sh");
        assert_eq!(capitalize("ı"), "Í");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_case_shape() {
        assert_eq!(CaseShape::of("salam"), CaseShape::Lower);
        assert_eq!(CaseShape::of("Salam"), CaseShape::Capitalized);
        assert_eq!(CaseShape::of("SALAM"), CaseShape::Upper);
        assert_eq!(CaseShape::of("SaLam"), CaseShape::Mixed);
        assert_eq!(CaseShape::of("S"), CaseShape::Capitalized);
        assert_eq!(CaseShape::of("123"), CaseShape::Lower);

        assert_eq!(CaseShape::Capitalized.apply("ızbasar"), "Ízbasar");
        assert_eq!(CaseShape::Upper.apply("salam"), "SALAM");
        assert_eq!(CaseShape::Mixed.apply("salam"), "salam");
    }
}
