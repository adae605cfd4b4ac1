//! Readability and sentiment metrics for one article.
//!
//! Fog index: `0.4 * (avg_sentence_length + percentage_complex_words)`, where
//! the percentage is already on a 0–100 scale.
//!
//! All counts run over the filtered vocabulary (lowercase, alphabetic,
//! stopwords removed) except the personal pronoun count, which scans the
//! unfiltered body. Every ratio whose denominator is the filtered word count
//! is 0 for an article with no filtered words.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicons;
use crate::normalize::{self, NormalizedText};
use crate::sentiment::SentimentScorer;
use crate::syllables;
use crate::text;

/// Whole-word personal pronouns, case-insensitive. Matches "US" too.
static PERSONAL_PRONOUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:I|we|my|ours|us)\b").expect("valid regex"));

/// Fog index weight.
const FOG_WEIGHT: f64 = 0.4;

/// Output column names of the metric fields, in report order.
pub const METRIC_COLUMNS: [&str; 13] = [
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVG SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "SYLLABLE PER WORD",
    "PERSONAL PRONOUNS",
    "AVG WORD LENGTH",
];

/// A single metric value as it appears in a report cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// An integer count.
    Count(usize),
    /// A real-valued score or ratio.
    Score(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Score(x) => write!(f, "{x}"),
        }
    }
}

/// All metrics computed for one article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Filtered words found in the positive lexicon.
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    /// Filtered words found in the negative lexicon.
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    /// Scorer polarity of the body, in [-1, 1].
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    /// Scorer subjectivity of the body, in [0, 1].
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    /// Filtered words per sentence.
    #[serde(rename = "AVG SENTENCE LENGTH")]
    pub avg_sentence_length: f64,
    /// Complex words as a percentage (0–100) of filtered words.
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex_words: f64,
    /// Gunning fog index.
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    /// Same value as `avg_sentence_length`; kept as its own report column.
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    /// Filtered words with more than two syllables.
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: usize,
    /// Number of filtered words.
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    /// Mean syllables per filtered word.
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllables_per_word: f64,
    /// Personal pronouns in the unfiltered body.
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: usize,
    /// Mean character length of filtered words.
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
}

impl MetricRecord {
    /// `(column, value)` pairs in [`METRIC_COLUMNS`] order.
    pub fn columns(&self) -> [(&'static str, MetricValue); 13] {
        use MetricValue::{Count, Score};
        let values = [
            Count(self.positive_score),
            Count(self.negative_score),
            Score(self.polarity_score),
            Score(self.subjectivity_score),
            Score(self.avg_sentence_length),
            Score(self.percentage_complex_words),
            Score(self.fog_index),
            Score(self.avg_words_per_sentence),
            Count(self.complex_word_count),
            Count(self.word_count),
            Score(self.syllables_per_word),
            Count(self.personal_pronouns),
            Score(self.avg_word_length),
        ];
        std::array::from_fn(|i| (METRIC_COLUMNS[i], values[i]))
    }

    /// Value of the metric column `name`, if it is one.
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.columns()
            .into_iter()
            .find_map(|(column, value)| (column == name).then_some(value))
    }
}

/// Compute metrics for stored article text whose first line is the title.
pub fn analyze_article(
    text: &str,
    lexicons: &Lexicons,
    scorer: &dyn SentimentScorer,
) -> MetricRecord {
    let (_title, body) = text::split_title(text);
    compute_metrics(body, lexicons, scorer)
}

/// Compute metrics for an article body (title already removed).
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
pub fn compute_metrics(
    body: &str,
    lexicons: &Lexicons,
    scorer: &dyn SentimentScorer,
) -> MetricRecord {
    let normalized = normalize::normalize(body, &lexicons.stopwords);
    let sentiment = scorer.score(body);
    let record = metrics_from_parts(
        &normalized,
        lexicons,
        sentiment.polarity,
        sentiment.subjectivity,
        count_personal_pronouns(body),
    );
    tracing::debug!(
        words = record.word_count,
        sentences = normalized.sentence_count(),
        fog = record.fog_index,
        "computed metrics"
    );
    record
}

fn metrics_from_parts(
    normalized: &NormalizedText,
    lexicons: &Lexicons,
    polarity_score: f64,
    subjectivity_score: f64,
    personal_pronouns: usize,
) -> MetricRecord {
    let tokens = &normalized.tokens;
    let word_count = tokens.len();
    let words = word_count as f64;

    let positive_score = tokens
        .iter()
        .filter(|w| lexicons.positive.contains(w.as_str()))
        .count();
    let negative_score = tokens
        .iter()
        .filter(|w| lexicons.negative.contains(w.as_str()))
        .count();

    let syllable_counts: Vec<usize> = tokens
        .iter()
        .map(|w| syllables::count_syllables(w))
        .collect();
    let complex_word_count = syllable_counts
        .iter()
        .filter(|&&n| n > syllables::COMPLEX_WORD_SYLLABLES)
        .count();

    let avg_sentence_length = words / normalized.sentence_count() as f64;
    let complex_fraction = if word_count > 0 {
        complex_word_count as f64 / words
    } else {
        0.0
    };
    let percentage_complex_words = complex_fraction * 100.0;
    let fog_index = FOG_WEIGHT * (avg_sentence_length + percentage_complex_words);

    let syllables_per_word = if word_count > 0 {
        syllable_counts.iter().sum::<usize>() as f64 / words
    } else {
        0.0
    };
    let avg_word_length = if word_count > 0 {
        tokens.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words
    } else {
        0.0
    };

    MetricRecord {
        positive_score,
        negative_score,
        polarity_score,
        subjectivity_score,
        avg_sentence_length,
        percentage_complex_words,
        fog_index,
        avg_words_per_sentence: avg_sentence_length,
        complex_word_count,
        word_count,
        syllables_per_word,
        personal_pronouns,
        avg_word_length,
    }
}

/// Count personal pronouns (I, we, my, ours, us) as whole words, any case.
pub fn count_personal_pronouns(text: &str) -> usize {
    PERSONAL_PRONOUNS.find_iter(text).count()
}
