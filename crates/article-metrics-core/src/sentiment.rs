//! Polarity and subjectivity scoring.
//!
//! The metrics engine only depends on the [`SentimentScorer`] trait. The
//! default [`LexiconScorer`] averages adjective scores from a lexicon, with
//! intensifiers ("very good") scaling the next word and negations
//! ("not good") flipping and damping it.
//!
//! # Lexicon file format
//!
//! Tab- or whitespace-separated, one entry per line, `#` comments:
//!
//! ```text
//! # word      polarity  subjectivity  [intensity]
//! superb      0.9       1.0
//! very        0.0       0.0           1.3
//! ```

use std::collections::HashMap;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionaries::sentiment::{ENTRIES, NEGATIONS};
use crate::error::{LexiconError, LexiconResult};
use crate::lexicon::read_permissive;
use crate::text;

/// Polarity damping applied after a negation.
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity and subjectivity of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Negative to positive, in [-1, 1].
    pub polarity: f64,
    /// Objective to subjective, in [0, 1].
    pub subjectivity: f64,
}

impl Sentiment {
    /// Build a sentiment clamped to the valid ranges.
    pub fn clamped(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// A general-purpose sentiment analyzer.
///
/// Implementations must be pure: the same text always yields the same
/// result.
pub trait SentimentScorer {
    /// Score `text`, returning polarity in [-1, 1] and subjectivity in [0, 1].
    fn score(&self, text: &str) -> Sentiment;
}

/// One lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentEntry {
    /// Polarity contribution in [-1, 1].
    pub polarity: f64,
    /// Subjectivity contribution in [0, 1].
    pub subjectivity: f64,
    /// Multiplier applied to the following word when this is an intensifier.
    pub intensity: f64,
}

impl SentimentEntry {
    #[allow(clippy::float_cmp)]
    fn is_intensifier(&self) -> bool {
        self.polarity == 0.0 && self.intensity != 1.0
    }
}

/// Lexicon-based [`SentimentScorer`].
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    entries: HashMap<String, SentimentEntry>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconScorer {
    /// Scorer backed by the built-in adjective lexicon.
    pub fn builtin() -> Self {
        let entries = ENTRIES
            .iter()
            .map(|&(word, polarity, subjectivity, intensity)| {
                (
                    word.to_string(),
                    SentimentEntry {
                        polarity,
                        subjectivity,
                        intensity,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Scorer with exactly the given entries. Keys are lowercased.
    pub fn with_entries(entries: HashMap<String, SentimentEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, entry)| (word.to_lowercase(), entry))
            .collect();
        Self { entries }
    }

    /// Add entries from a lexicon file, overriding built-in words.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn extend_from_file(mut self, path: &Utf8Path) -> LexiconResult<Self> {
        let content = read_permissive(path)?;
        let mut added = 0usize;
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, entry) = parse_entry(line).map_err(|reason| LexiconError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            })?;
            self.entries.insert(word, entry);
            added += 1;
        }
        debug!(added, total = self.entries.len(), "loaded sentiment lexicon");
        Ok(self)
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let words: Vec<String> = text::tokenize_words(text)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut scored = 0usize;

        let mut intensity = 1.0;
        let mut negated = false;
        for word in &words {
            if NEGATIONS.contains(&word.as_str()) {
                negated = true;
                continue;
            }
            match self.entries.get(word) {
                Some(entry) if entry.is_intensifier() => {
                    intensity *= entry.intensity;
                }
                Some(entry) => {
                    let mut polarity = entry.polarity * intensity;
                    let subjectivity = entry.subjectivity * intensity;
                    if negated {
                        polarity *= NEGATION_FACTOR;
                    }
                    polarity_sum += polarity;
                    subjectivity_sum += subjectivity;
                    scored += 1;
                    intensity = 1.0;
                    negated = false;
                }
                None => {
                    intensity = 1.0;
                    negated = false;
                }
            }
        }

        if scored == 0 {
            return Sentiment::default();
        }
        let n = scored as f64;
        Sentiment::clamped(polarity_sum / n, subjectivity_sum / n)
    }
}

fn parse_entry(line: &str) -> Result<(String, SentimentEntry), String> {
    let mut fields = line.split_whitespace();
    let word = fields
        .next()
        .ok_or_else(|| "missing word".to_string())?
        .to_lowercase();
    let mut number = |name: &str| -> Result<Option<f64>, String> {
        fields
            .next()
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| format!("{name} {raw:?} is not a number"))
            })
            .transpose()
    };
    let polarity = number("polarity")?.ok_or_else(|| "missing polarity".to_string())?;
    let subjectivity = number("subjectivity")?.ok_or_else(|| "missing subjectivity".to_string())?;
    let intensity = number("intensity")?.unwrap_or(1.0);

    if !(-1.0..=1.0).contains(&polarity) {
        return Err(format!("polarity {polarity} outside [-1, 1]"));
    }
    if !(0.0..=1.0).contains(&subjectivity) {
        return Err(format!("subjectivity {subjectivity} outside [0, 1]"));
    }
    if !intensity.is_finite() || intensity <= 0.0 {
        return Err(format!("intensity {intensity} must be a positive number"));
    }

    Ok((
        word,
        SentimentEntry {
            polarity,
            subjectivity,
            intensity,
        },
    ))
}
