//! Text processing utilities.
//!
//! Provides title stripping, sentence splitting, and Treebank-style word
//! tokenization for the normalizer and the sentiment scorer.

use regex::Regex;
use std::sync::LazyLock;

use crate::dictionaries::abbreviations::{is_abbreviation, is_numeric_abbreviation};

/// Regex for URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+$").expect("valid regex"));

/// Regex for email addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\.?$").expect("valid regex")
});

/// Regex for initials (J.K., U.S.A., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\.)+[A-Z]?\.?$").expect("valid regex"));

/// Treebank rewrites applied to a raw sentence, in order.
///
/// Each rule pads the text it isolates with spaces; tokens are whatever
/// survives between whitespace at the end.
static PUNCTUATION_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile_rules(&[
        // opening quotes
        (r"([«“‘„]|`+)", " $1 "),
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'')"#, "$1 `` "),
        // sentence-final period, before any closing brackets or quotes
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2 $3 "),
        // comma or colon unless inside a number ("1,000", "10:30")
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.{2,}", " $0 "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2$3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
        (r"\*", " $0 "),
        (r"[\]\[(){}<>]", " $0 "),
        (r"--", " -- "),
    ])
});

/// Treebank rewrites applied after the sentence is padded with spaces.
static CONTRACTION_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile_rules(&[
        // closing quotes
        (r"([»”’])", " $1 "),
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)\b", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn compile_rules(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|&(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
        .collect()
}

/// Split stored article text into `(title, body)`.
///
/// The first line is the title when the text has more than one line.
/// Text without any line break is all body and the title is empty.
pub fn split_title(text: &str) -> (&str, &str) {
    text.split_once('\n').unwrap_or(("", text))
}

/// Split text into sentences with abbreviation, initial, decimal, URL, and email awareness.
///
/// Uses a character-by-character scan with context-based boundary detection.
/// Fragments without any letter or digit (stray punctuation) are dropped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);

        if is_sentence_terminator(ch) {
            let context = extract_context(&chars, i);

            if is_sentence_boundary(&context, &current) {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
    }

    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence.to_string());
    }
}

/// Split text into word tokens the way a Penn Treebank tokenizer does.
///
/// The text is split into sentences first, so only a sentence-final period
/// is detached. Commas outside numbers, `?`, `!`, `;@#$%&`, brackets,
/// ellipses and `--` become tokens wherever they appear, and English
/// contractions are split (`don't` → `do`, `n't`). Hyphens and inner
/// periods stay attached (`well-known`, `3.5`, `U.S`).
pub fn tokenize_words(text: &str) -> Vec<String> {
    split_sentences(text)
        .iter()
        .flat_map(|sentence| treebank_tokens(sentence))
        .collect()
}

/// Word tokens made only of alphabetic characters, in their original case.
pub fn alphabetic_words(text: &str) -> Vec<String> {
    tokenize_words(text)
        .into_iter()
        .filter(|t| t.chars().all(char::is_alphabetic))
        .collect()
}

fn treebank_tokens(sentence: &str) -> Vec<String> {
    let mut text = sentence.to_string();
    for (pattern, replacement) in PUNCTUATION_RULES.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text = format!(" {text} ");
    for (pattern, replacement) in CONTRACTION_RULES.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.split_whitespace().map(String::from).collect()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Context around a potential sentence boundary.
struct SentenceContext {
    punctuation: char,
    word_before: String,
    char_after: Option<char>,
    text_after: String,
    next_is_terminator: bool,
    is_end_of_text: bool,
}

fn extract_context(chars: &[char], pos: usize) -> SentenceContext {
    let mut after_start = pos + 1;
    while after_start < chars.len() && chars[after_start].is_whitespace() {
        after_start += 1;
    }

    SentenceContext {
        punctuation: chars[pos],
        word_before: get_word_before(chars, pos),
        char_after: chars.get(after_start).copied(),
        text_after: chars[after_start..].iter().take(20).collect(),
        next_is_terminator: chars.get(pos + 1).copied().is_some_and(is_sentence_terminator),
        is_end_of_text: pos == chars.len() - 1,
    }
}

/// The token immediately before `pos`, including any inner periods (`U.S`).
fn get_word_before(chars: &[char], pos: usize) -> String {
    let mut word_chars = Vec::new();
    let mut i = pos;
    while i > 0 {
        i -= 1;
        let c = chars[i];
        if c.is_alphanumeric() || c == '.' {
            word_chars.push(c);
        } else {
            break;
        }
    }
    word_chars.reverse();
    word_chars.into_iter().collect()
}

fn is_sentence_boundary(context: &SentenceContext, current_sentence: &str) -> bool {
    if context.is_end_of_text {
        return true;
    }

    // Runs like "?!" or "..." end on their last character.
    if context.next_is_terminator {
        return false;
    }

    if context.punctuation == '!' || context.punctuation == '?' {
        return check_next_char_capitalization(context);
    }

    if is_abbreviation(&context.word_before) {
        return false;
    }

    if is_numeric_abbreviation(&context.word_before)
        && context.char_after.is_some_and(|c| c.is_ascii_digit())
    {
        return false;
    }

    if is_likely_initial(&context.word_before) {
        return false;
    }

    if contains_url_or_email(current_sentence) {
        return false;
    }

    // Digit after period following a digit = decimal number (e.g., "3.14")
    if let Some(next_char) = context.char_after
        && next_char.is_ascii_digit()
        && context
            .word_before
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit())
    {
        return false;
    }

    // An ellipsis trailing into lowercase continues the sentence.
    if context.word_before.ends_with('.')
        && context.char_after.is_some_and(char::is_lowercase)
    {
        return false;
    }

    true
}

fn check_next_char_capitalization(context: &SentenceContext) -> bool {
    match context.char_after {
        Some(c) if c.is_lowercase() => false,
        Some('"' | '\'') => !context
            .text_after
            .chars()
            .nth(1)
            .is_some_and(char::is_lowercase),
        _ => true,
    }
}

fn is_likely_initial(word: &str) -> bool {
    // A single capital letter ("J. Smith") or dotted initials ("J.K").
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_uppercase()
    {
        return true;
    }
    word.contains('.') && INITIALS_PATTERN.is_match(&format!("{word}."))
}

fn contains_url_or_email(sentence: &str) -> bool {
    let tail = sentence.trim_end_matches('.');
    let token = tail.split_whitespace().next_back().unwrap_or("");
    URL_PATTERN.is_match(token) || EMAIL_PATTERN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_title_strips_first_line() {
        assert_eq!(
            split_title("Title Line\nI love this. We are happy."),
            ("Title Line", "I love this. We are happy.")
        );
        assert_eq!(split_title("a\nb\nc"), ("a", "b\nc"));
    }

    #[test]
    fn split_title_single_line_is_all_body() {
        assert_eq!(split_title("No title here."), ("", "No title here."));
    }

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences, vec!["This is a sentence.", "This is another sentence."]);
    }

    #[test]
    fn abbreviations_not_split() {
        let sentences = split_sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("Dr. Smith"));
    }

    #[test]
    fn initials_not_split() {
        let sentences = split_sentences("The book by J. K. Rowling sold well. It was long.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn decimal_numbers_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn punctuation_runs_stay_together() {
        let sentences = split_sentences("Wait... What?! Fine.");
        assert_eq!(sentences, vec!["Wait...", "What?!", "Fine."]);
    }

    #[test]
    fn lowercase_after_period_still_splits() {
        assert_eq!(split_sentences("We win. we win."), vec!["We win.", "we win."]);
        assert_eq!(split_sentences("Sales rose. iPhone demand fell.").len(), 2);
    }

    #[test]
    fn ellipsis_into_lowercase_continues() {
        assert_eq!(split_sentences("I was thinking... maybe not. Fine.").len(), 2);
    }

    #[test]
    fn plain_words_ending_a_sentence_split() {
        let sentences = split_sentences("The answer was no. Then we moved on.");
        assert_eq!(sentences, vec!["The answer was no.", "Then we moved on."]);
        assert_eq!(split_sentences("See No. 5 for details. It helps.").len(), 2);
    }

    #[test]
    fn newlines_without_punctuation_do_not_split() {
        let sentences = split_sentences("First heading\nBody text follows here.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("...").is_empty());
    }

    #[test]
    fn tokenize_peels_punctuation() {
        assert_eq!(
            tokenize_words("Hello, world! (Really?)"),
            vec!["Hello", ",", "world", "!", "(", "Really", "?", ")"]
        );
    }

    #[test]
    fn tokenize_splits_contractions() {
        assert_eq!(
            tokenize_words("I don't think it's over"),
            vec!["I", "do", "n't", "think", "it", "'s", "over"]
        );
        assert_eq!(tokenize_words("We'll"), vec!["We", "'ll"]);
    }

    #[test]
    fn tokenize_keeps_inner_punctuation() {
        assert_eq!(tokenize_words("well-known 3.5 U.S."), vec!["well-known", "3.5", "U.S", "."]);
    }

    #[test]
    fn tokenize_splits_double_dash() {
        assert_eq!(tokenize_words("Rust--a language"), vec!["Rust", "--", "a", "language"]);
    }

    #[test]
    fn tokenize_splits_inner_ellipsis() {
        assert_eq!(tokenize_words("wait...what"), vec!["wait", "...", "what"]);
    }

    #[test]
    fn tokenize_splits_comma_before_non_digit() {
        assert_eq!(
            tokenize_words("however,the market"),
            vec!["however", ",", "the", "market"]
        );
        assert_eq!(tokenize_words("sold 1,000 units"), vec!["sold", "1,000", "units"]);
    }

    #[test]
    fn tokenize_splits_inner_question_and_exclamation() {
        assert_eq!(tokenize_words("really?yes"), vec!["really", "?", "yes"]);
        assert_eq!(tokenize_words("wow!great"), vec!["wow", "!", "great"]);
    }

    #[test]
    fn tokenize_splits_symbols() {
        assert_eq!(
            tokenize_words("rock&roll;jazz@home #1 $5 10%"),
            vec!["rock", "&", "roll", ";", "jazz", "@", "home", "#", "1", "$", "5", "10", "%"]
        );
    }

    #[test]
    fn tokenize_detaches_period_only_at_sentence_end() {
        assert_eq!(
            tokenize_words("Dr. Smith left. He returned."),
            vec!["Dr.", "Smith", "left", ".", "He", "returned", "."]
        );
    }

    #[test]
    fn alphabetic_words_after_treebank_splits() {
        let words = alphabetic_words("Rust--a fast, however,the wait...what");
        assert_eq!(words, vec!["Rust", "a", "fast", "however", "the", "wait", "what"]);
    }

    #[test]
    fn alphabetic_words_drop_mixed_tokens() {
        assert_eq!(
            alphabetic_words("In 2023, the well-known firm's revenue rose 12%."),
            vec!["In", "the", "firm", "revenue", "rose"]
        );
    }

    #[test]
    fn alphabetic_words_accept_unicode_letters() {
        assert_eq!(alphabetic_words("café naïve"), vec!["café", "naïve"]);
    }
}
