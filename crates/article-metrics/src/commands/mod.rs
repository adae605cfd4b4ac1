//! Command implementations.

use anyhow::Context;
use article_metrics_core::config::Config;
use article_metrics_core::table::{self, InputTable};
use article_metrics_core::{LexiconPaths, LexiconScorer, Lexicons};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

pub mod analyze;
#[cfg(feature = "fetch")]
pub mod extract;
pub mod info;
pub mod score;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    check_input_size(path, max_bytes)?;
    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read an input table (CSV, or a workbook for `.xlsx`) within the size limit.
pub fn read_input_table(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<InputTable> {
    check_input_size(path, max_bytes)?;
    table::read_input(path).with_context(|| format!("failed to read input table {path}"))
}

// Preflight: check file size via metadata before reading into memory.
fn check_input_size(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<()> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }
    Ok(())
}

/// Word list overrides shared by the analysis commands.
#[derive(Args, Debug, Default, Clone)]
pub struct LexiconArgs {
    /// Positive word list [default: MasterDictionary/positive-words.txt]
    #[arg(long, value_name = "FILE")]
    pub positive: Option<Utf8PathBuf>,

    /// Negative word list [default: MasterDictionary/negative-words.txt]
    #[arg(long, value_name = "FILE")]
    pub negative: Option<Utf8PathBuf>,

    /// Directory of stopword *.txt files [default: StopWords]
    #[arg(long, value_name = "DIR")]
    pub stopwords: Option<Utf8PathBuf>,

    /// Extra polarity/subjectivity lexicon (word, polarity, subjectivity[, intensity])
    #[arg(long, value_name = "FILE")]
    pub sentiment_lexicon: Option<Utf8PathBuf>,
}

impl LexiconArgs {
    /// Lexicon locations: flags first, then config, then defaults.
    pub fn paths(&self, config: &Config) -> LexiconPaths {
        let defaults = config.lexicon_paths();
        LexiconPaths {
            positive: self.positive.clone().unwrap_or(defaults.positive),
            negative: self.negative.clone().unwrap_or(defaults.negative),
            stopwords: self.stopwords.clone().unwrap_or(defaults.stopwords),
        }
    }

    /// Load the word lists and build the sentiment scorer.
    pub fn load(&self, config: &Config) -> anyhow::Result<(Lexicons, LexiconScorer)> {
        let lexicons = Lexicons::load(&self.paths(config)).context("failed to load lexicons")?;

        let mut scorer = LexiconScorer::builtin();
        if let Some(path) = self
            .sentiment_lexicon
            .as_ref()
            .or(config.sentiment_lexicon.as_ref())
        {
            scorer = scorer
                .extend_from_file(path)
                .with_context(|| format!("failed to load sentiment lexicon {path}"))?;
        }
        Ok((lexicons, scorer))
    }
}

/// A progress bar over `len` records, or a hidden one.
pub fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn read_input_file_enforces_limit() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp).join("Input.csv");
        fs::write(&path, "URL_ID,URL\n1,https://e.com\n").unwrap();

        assert!(read_input_file(&path, None).is_ok());
        assert!(read_input_file(&path, Some(1024)).is_ok());
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn read_input_table_applies_limit_and_parses() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(&tmp).join("Input.csv");
        fs::write(&path, "URL_ID,URL\n1,https://e.com\n").unwrap();

        let table = read_input_table(&path, Some(1024)).unwrap();
        assert_eq!(table.records[0].get("URL_ID"), Some("1"));
        let err = read_input_table(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn flags_override_config_paths() {
        let config = Config {
            positive_words: Some("cfg/pos.txt".into()),
            stopwords_dir: Some("cfg/stop".into()),
            ..Config::default()
        };
        let args = LexiconArgs {
            stopwords: Some("flag/stop".into()),
            ..LexiconArgs::default()
        };
        let paths = args.paths(&config);
        assert_eq!(paths.positive.as_str(), "cfg/pos.txt");
        assert_eq!(paths.negative.as_str(), "MasterDictionary/negative-words.txt");
        assert_eq!(paths.stopwords.as_str(), "flag/stop");
    }

    #[test]
    fn missing_lexicon_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8(&tmp);
        let args = LexiconArgs {
            positive: Some(dir.join("nope.txt")),
            negative: Some(dir.join("nope.txt")),
            stopwords: Some(dir.clone()),
            sentiment_lexicon: None,
        };
        assert!(args.load(&Config::default()).is_err());
    }
}
