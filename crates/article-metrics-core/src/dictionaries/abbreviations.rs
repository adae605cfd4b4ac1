//! Abbreviations that do not end a sentence when followed by a period.
//!
//! Tuned for news and blog prose: honorifics, corporate suffixes, months,
//! and the handful of Latin shorthands that show up in articles. Units of
//! measurement are deliberately absent so that "in." or "m." at the end of a
//! sentence still splits.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Known abbreviations, lowercase, without the trailing period.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "st", "hon", "capt", "col",
        "gen", "lt", "maj", "sgt", "adm", "sen", "rep", "gov", "pres",
    ]);

    // Organizations
    set.extend(["inc", "corp", "ltd", "llc", "co", "bros", "intl", "dept", "univ", "assn"]);

    // Latin and editorial shorthand
    set.extend(["etc", "vs", "e.g", "i.e", "cf", "viz", "approx"]);

    // Dates
    set.extend([
        "a.m", "p.m", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
        "nov", "dec",
    ]);

    // Places
    set.extend(["u.s", "u.k", "u.s.a", "e.u", "u.n", "ave", "blvd", "mt"]);

    set
});

/// Abbreviations that only hold before a number ("No. 5", "Vol. 2").
///
/// Elsewhere they are ordinary words: "The answer was no." ends a sentence.
pub static NUMERIC_ABBREVIATIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["no", "nos", "vol", "vols", "fig", "figs", "pp"]));

/// Check if a word is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    ABBREVIATIONS.contains(word_lower.trim_matches('.'))
}

/// Check if a word abbreviates only when a number follows it.
pub fn is_numeric_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    NUMERIC_ABBREVIATIONS.contains(word_lower.trim_matches('.'))
}
