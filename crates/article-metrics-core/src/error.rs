//! Error types for article-metrics-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading word lists.
///
/// Every variant is fatal to a run: scores are meaningless without the
/// lexicons, so there is no fallback dictionary.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A required word list or stopword directory does not exist.
    #[error("lexicon source not found: {0}")]
    NotFound(Utf8PathBuf),

    /// The stopword directory contained no `.txt` word lists.
    #[error("no word lists found in {0}")]
    EmptyDirectory(Utf8PathBuf),

    /// A lexicon source could not be read.
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        /// The file or directory being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line in a sentiment lexicon could not be parsed.
    #[error("{path}:{line}: {reason}")]
    Parse {
        /// The lexicon file.
        path: Utf8PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that can occur when reading or writing stored articles.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The article identifier cannot be used as a file name.
    #[error("invalid article identifier: {0:?}")]
    InvalidId(String),

    /// Reading or writing an article file failed.
    #[error("article store I/O failed for {path}: {source}")]
    Io {
        /// The article file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading input tables or writing reports.
#[derive(Error, Debug)]
pub enum TableError {
    /// Delimited-text parsing or writing failed.
    #[error("{path}: {source}")]
    Csv {
        /// The table file.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// JSON report serialization failed.
    #[error("{path}: {source}")]
    Json {
        /// The report file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Plain file I/O failed.
    #[error("{path}: {source}")]
    Io {
        /// The file being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input table lacks a required column.
    #[error("{path}: missing required column {column:?}")]
    MissingColumn {
        /// The input table.
        path: Utf8PathBuf,
        /// The column that was expected.
        column: String,
    },

    /// The output schema file had no header line.
    #[error("{0}: output schema is empty")]
    EmptySchema(Utf8PathBuf),

    /// An input workbook could not be opened or its sheet decoded.
    #[error("{path}: {source}")]
    WorkbookRead {
        /// The workbook file.
        path: Utf8PathBuf,
        /// Underlying spreadsheet error.
        source: calamine::XlsxError,
    },

    /// An input workbook has no worksheet.
    #[error("{0}: workbook has no worksheet")]
    EmptyWorkbook(Utf8PathBuf),

    /// Writing a workbook report failed.
    #[error("{path}: {source}")]
    WorkbookWrite {
        /// The report file.
        path: Utf8PathBuf,
        /// Underlying spreadsheet error.
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Result type alias using [`TableError`].
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while fetching and extracting an article.
#[cfg(feature = "fetch")]
#[derive(Error, Debug)]
pub enum ExtractError {
    /// HTTP request errors from reqwest.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    #[error("request timed out after {timeout} seconds")]
    Timeout {
        /// Configured timeout in seconds.
        timeout: u64,
    },

    /// The server answered with a non-success status.
    #[error("server returned {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Invalid URL provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No article body could be extracted from the page.
    #[error("no article text found")]
    NoContent,
}

/// Result type alias using [`ExtractError`].
#[cfg(feature = "fetch")]
pub type ExtractResult<T> = Result<T, ExtractError>;
