//! Turns an article body into the analysis vocabulary.

use crate::lexicon::Lexicon;
use crate::text;

/// Sentences and filtered tokens of one article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Lowercase alphabetic tokens with stopwords removed, in text order.
    pub tokens: Vec<String>,
    /// Sentences of the body before any filtering.
    pub sentences: Vec<String>,
}

impl NormalizedText {
    /// Sentence count for rate computations. Never zero.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len().max(1)
    }

    /// Number of filtered tokens.
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Segment `body` into sentences and filtered word tokens.
///
/// The body must already have its title line removed (see
/// [`text::split_title`]).
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub fn normalize(body: &str, stopwords: &Lexicon) -> NormalizedText {
    let sentences = text::split_sentences(body);
    let tokens = text::alphabetic_words(body)
        .into_iter()
        .map(|word| word.to_lowercase())
        .filter(|word| !stopwords.contains(word))
        .collect();

    NormalizedText { tokens, sentences }
}
