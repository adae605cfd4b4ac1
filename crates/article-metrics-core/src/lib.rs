//! Core library for article-metrics.
//!
//! Computes readability and sentiment metrics for article text. The metrics
//! are a pure function of the article body, three word lexicons, and a
//! [`SentimentScorer`].
//!
//! # Modules
//!
//! - [`lexicon`] - Positive, negative and stopword lists
//! - [`text`] - Title splitting, sentence segmentation, word tokenization
//! - [`normalize`] - Filtered analysis vocabulary
//! - [`syllables`] - Syllable counting and complex words
//! - [`sentiment`] - Polarity/subjectivity scoring
//! - [`metrics`] - The per-article metric record
//! - [`report`] - Report rows and output schemas
//! - [`store`] - `<id>.txt` article files
//! - [`table`] - CSV/xlsx input, header files, CSV/xlsx/JSON reports
//! - [`pipeline`] - Batch analysis in input order
//! - [`extract`] - HTTP fetch and HTML extraction (feature `fetch`)
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use article_metrics_core::{LexiconScorer, Lexicons, analyze_article};
//! use article_metrics_core::config::ConfigLoader;
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let lexicons = Lexicons::load(&config.lexicon_paths()).expect("lexicons");
//! let scorer = LexiconScorer::builtin();
//! let metrics = analyze_article("Title\nWe love this. It works.", &lexicons, &scorer);
//! println!("fog index: {}", metrics.fog_index);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionaries;
pub mod error;
#[cfg(feature = "fetch")]
pub mod extract;
pub mod lexicon;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod store;
pub mod syllables;
pub mod table;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    ConfigError, ConfigResult, LexiconError, LexiconResult, StoreError, StoreResult, TableError,
    TableResult,
};
#[cfg(feature = "fetch")]
pub use error::{ExtractError, ExtractResult};
pub use lexicon::{Lexicon, LexiconPaths, Lexicons};
pub use metrics::{METRIC_COLUMNS, MetricRecord, MetricValue, analyze_article, compute_metrics};
pub use pipeline::{BatchReport, BatchSummary, analyze_batch};
pub use report::{InputRecord, OutputRow, OutputSchema, build_row};
pub use sentiment::{LexiconScorer, Sentiment, SentimentScorer};
pub use store::{Article, ArticleStore};
