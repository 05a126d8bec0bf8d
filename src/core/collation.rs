//! Locale-aware ordering for message ids.
//!
//! Translation files are sorted so that diffs stay minimal and match the order
//! a JavaScript `localeCompare` would produce for the ids used in practice.
//! Three levels, as in CLDR root collation:
//!
//! 1. base characters, case-insensitive and with Latin accents folded away;
//!    whitespace < punctuation < digits < letters
//! 2. accents: an unaccented letter sorts before its accented forms
//! 3. case: lowercase before uppercase
//!
//! Letters outside the Latin-1 and Latin Extended-A ranges are compared by
//! their lowercase code point on the first level.

use std::cmp::Ordering;

/// ASCII punctuation and symbols in CLDR root collation order.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

/// Accented lowercase Latin letters grouped by base letter. The position in
/// each group is the accent's secondary weight.
const ACCENTED: &[(char, &str)] = &[
    ('a', "àáâãäåāăą"),
    ('c', "çćĉċč"),
    ('d', "ď"),
    ('e', "èéêëēĕėęě"),
    ('g', "ĝğġģ"),
    ('h', "ĥ"),
    ('i', "ìíîïĩīĭį"),
    ('j', "ĵ"),
    ('k', "ķ"),
    ('l', "ĺļľ"),
    ('n', "ñńņň"),
    ('o', "òóôõöøōŏő"),
    ('r', "ŕŗř"),
    ('s', "śŝşš"),
    ('t', "ţť"),
    ('u', "ùúûüũūŭůűų"),
    ('w', "ŵ"),
    ('y', "ýÿŷ"),
    ('z', "źżž"),
];

/// Lowercase base letter and accent weight (0 for none).
fn fold_letter(c: char) -> (char, u32) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    ACCENTED
        .iter()
        .find_map(|(base, forms)| {
            forms
                .chars()
                .position(|f| f == lower)
                .map(|idx| (*base, idx as u32 + 1))
        })
        .unwrap_or((lower, 0))
}

fn primary_key(c: char) -> (CharClass, u32, char) {
    if c.is_whitespace() {
        return (CharClass::Whitespace, 0, c);
    }
    if c.is_numeric() {
        return (CharClass::Digit, 0, c);
    }
    if c.is_alphabetic() {
        return (CharClass::Letter, 0, fold_letter(c).0);
    }
    let rank = PUNCTUATION_ORDER
        .find(c)
        .map_or(u32::MAX, |idx| idx as u32);
    (CharClass::Punctuation, rank, c)
}

fn accent_weight(c: char) -> u32 {
    if c.is_alphabetic() { fold_letter(c).1 } else { 0 }
}

/// Compare two ids the way the translation files are sorted.
///
/// Total order: equal only for identical strings.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key))
        .then_with(|| a.chars().map(accent_weight).cmp(b.chars().map(accent_weight)))
        .then_with(|| {
            // Lowercase first at the first position where only case differs.
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Sort a list of ids in place with [`locale_compare`].
pub fn sort_ids<S: AsRef<str>>(ids: &mut [S]) {
    ids.sort_by(|a, b| locale_compare(a.as_ref(), b.as_ref()));
}
