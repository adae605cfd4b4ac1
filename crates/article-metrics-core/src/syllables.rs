//! Heuristic syllable counting.
//!
//! Every vowel run (`a e i o u y`) is one syllable, a trailing `e` is treated
//! as silent, and every word has at least one syllable. No dictionary lookup:
//! the counts must stay stable across releases because reports are compared
//! run over run.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Words with more syllables than this are complex.
pub const COMPLEX_WORD_SYLLABLES: usize = 2;

/// Count the syllables in a single word.
///
/// Always returns at least 1, even for an empty string or a word with no
/// vowels.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();

    let mut count = 0usize;
    let mut prev_was_vowel = false;
    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1).max(1);
    }

    count.max(1)
}

/// Whether a word counts as complex (more than two syllables).
pub fn is_complex(word: &str) -> bool {
    count_syllables(word) > COMPLEX_WORD_SYLLABLES
}
