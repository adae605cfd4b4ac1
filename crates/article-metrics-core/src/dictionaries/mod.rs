//! Built-in dictionaries for text analysis.
//!
//! Small curated tables compiled into the crate: abbreviations for sentence
//! segmentation and the default adjective lexicon for sentiment scoring.
//! The positive, negative and stopword lists are never built in; they are
//! always loaded from disk by [`crate::lexicon`].

pub mod abbreviations;
pub mod sentiment;
