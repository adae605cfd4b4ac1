//! Word list loading.
//!
//! Three lexicons drive a run: positive words, negative words, and stopwords.
//! They are loaded once at startup into immutable [`Lexicon`] values and passed
//! by reference into the metrics engine.
//!
//! Word lists are often Latin-1 encoded. Files are decoded as UTF-8 when
//! valid and as ISO-8859-1 otherwise, so decoding never fails.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LexiconError, LexiconResult};

/// Marks a comment line in sentiment word lists.
const COMMENT_MARKER: char = ';';

/// Extension of stopword files inside the stopword directory.
const WORD_LIST_EXTENSION: &str = "txt";

/// An immutable set of lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from any iterator of words.
    ///
    /// Words are trimmed and lowercased; empty entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize_entry(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Load a sentiment word list.
    ///
    /// One word per line. Blank lines and lines starting with `;` are skipped.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load_word_list(path: &Utf8Path) -> LexiconResult<Self> {
        let content = read_permissive(path)?;
        let lexicon = Self::from_words(
            content
                .lines()
                .filter(|line| !line.starts_with(COMMENT_MARKER)),
        );
        debug!(words = lexicon.len(), "loaded word list");
        Ok(lexicon)
    }

    /// Load every `.txt` stopword list in a directory and union them.
    ///
    /// Blank lines are skipped; comment markers are not interpreted.
    /// Files are read in name order so logs are stable between runs.
    #[tracing::instrument(skip_all, fields(dir = %dir))]
    pub fn load_stopword_dir(dir: &Utf8Path) -> LexiconResult<Self> {
        if !dir.is_dir() {
            return Err(LexiconError::NotFound(dir.to_path_buf()));
        }

        let mut files: Vec<Utf8PathBuf> = dir
            .read_dir_utf8()
            .map_err(|source| LexiconError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(Result::ok)
            .map(|entry| entry.into_path())
            .filter(|path| path.extension() == Some(WORD_LIST_EXTENSION) && path.is_file())
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(LexiconError::EmptyDirectory(dir.to_path_buf()));
        }

        let mut words = HashSet::new();
        for file in &files {
            let content = read_permissive(file)?;
            words.extend(content.lines().filter_map(normalize_entry));
            debug!(file = %file, "read stopword list");
        }

        debug!(files = files.len(), words = words.len(), "loaded stopwords");
        Ok(Self { words })
    }

    /// Whether the lexicon contains `word` (expected lowercase).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Locations of the three word lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconPaths {
    /// Positive sentiment word list.
    pub positive: Utf8PathBuf,
    /// Negative sentiment word list.
    pub negative: Utf8PathBuf,
    /// Directory of stopword lists.
    pub stopwords: Utf8PathBuf,
}

/// The three lexicons used by the metrics engine.
#[derive(Debug, Clone, Default)]
pub struct Lexicons {
    /// Positive sentiment words.
    pub positive: Lexicon,
    /// Negative sentiment words.
    pub negative: Lexicon,
    /// Words removed before any counting.
    pub stopwords: Lexicon,
}

impl Lexicons {
    /// Load all three lexicons. Any missing source is an error.
    #[tracing::instrument(skip_all)]
    pub fn load(paths: &LexiconPaths) -> LexiconResult<Self> {
        let lexicons = Self {
            positive: Lexicon::load_word_list(&paths.positive)?,
            negative: Lexicon::load_word_list(&paths.negative)?,
            stopwords: Lexicon::load_stopword_dir(&paths.stopwords)?,
        };
        info!(
            positive = lexicons.positive.len(),
            negative = lexicons.negative.len(),
            stopwords = lexicons.stopwords.len(),
            "lexicons loaded"
        );
        Ok(lexicons)
    }
}

fn normalize_entry(line: &str) -> Option<String> {
    let word = line.trim();
    (!word.is_empty()).then(|| word.to_lowercase())
}

/// Read a text file as UTF-8, falling back to ISO-8859-1.
pub(crate) fn read_permissive(path: &Utf8Path) -> LexiconResult<String> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LexiconError::NotFound(path.to_path_buf())
        } else {
            LexiconError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(decode_permissive(bytes))
}

pub(crate) fn decode_permissive(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        // Latin-1 maps each byte to the code point of the same value.
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn word_list_skips_comments_and_blanks() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let path = dir.join("positive-words.txt");
        fs::write(
            &path,
            ";;; Opinion lexicon\n;\n\nGood\n  excellent  \n;not-a-word\ngood\n",
        )
        .unwrap();

        let lexicon = Lexicon::load_word_list(&path).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.contains("good"));
        assert!(lexicon.contains("excellent"));
        assert!(!lexicon.contains(";not-a-word"));
    }

    #[test]
    fn indented_semicolon_is_not_a_comment() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_dir(&tmp).join("negative-words.txt");
        fs::write(&path, " ;odd\nbad\n").unwrap();

        let lexicon = Lexicon::load_word_list(&path).unwrap();
        assert!(lexicon.contains(";odd"));
        assert!(lexicon.contains("bad"));
    }

    #[test]
    fn missing_word_list_is_not_found() {
        let result = Lexicon::load_word_list(Utf8Path::new("/nonexistent/positive-words.txt"));
        assert!(matches!(result, Err(LexiconError::NotFound(_))));
    }

    #[test]
    fn latin1_bytes_are_tolerated() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_dir(&tmp).join("words.txt");
        // "café" in ISO-8859-1, which is invalid UTF-8
        fs::write(&path, b"caf\xe9\nplain\n").unwrap();

        let lexicon = Lexicon::load_word_list(&path).unwrap();
        assert!(lexicon.contains("café"));
        assert!(lexicon.contains("plain"));
    }

    #[test]
    fn stopword_dir_unions_txt_files() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        fs::write(dir.join("StopWords_Generic.txt"), "THE\nAnd\n\n").unwrap();
        fs::write(dir.join("StopWords_Names.txt"), "smith\nthe\n").unwrap();
        fs::write(dir.join("README.md"), "ignored\n").unwrap();

        let stopwords = Lexicon::load_stopword_dir(&dir).unwrap();
        assert_eq!(stopwords.len(), 3);
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("and"));
        assert!(stopwords.contains("smith"));
        assert!(!stopwords.contains("ignored"));
    }

    #[test]
    fn stopword_lines_keep_comment_markers() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        fs::write(dir.join("StopWords_Misc.txt"), ";semi\n").unwrap();

        let stopwords = Lexicon::load_stopword_dir(&dir).unwrap();
        assert!(stopwords.contains(";semi"));
    }

    #[test]
    fn missing_stopword_dir_is_not_found() {
        let result = Lexicon::load_stopword_dir(Utf8Path::new("/nonexistent/StopWords"));
        assert!(matches!(result, Err(LexiconError::NotFound(_))));
    }

    #[test]
    fn stopword_dir_without_lists_errors() {
        let tmp = TempDir::new().unwrap();
        let result = Lexicon::load_stopword_dir(&utf8_dir(&tmp));
        assert!(matches!(result, Err(LexiconError::EmptyDirectory(_))));
    }

    #[test]
    fn load_all_three() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        let stop_dir = dir.join("StopWords");
        fs::create_dir(&stop_dir).unwrap();
        fs::write(dir.join("positive-words.txt"), "good\n").unwrap();
        fs::write(dir.join("negative-words.txt"), "bad\n").unwrap();
        fs::write(stop_dir.join("StopWords_Generic.txt"), "the\n").unwrap();

        let lexicons = Lexicons::load(&LexiconPaths {
            positive: dir.join("positive-words.txt"),
            negative: dir.join("negative-words.txt"),
            stopwords: stop_dir,
        })
        .unwrap();

        assert!(lexicons.positive.contains("good"));
        assert!(lexicons.negative.contains("bad"));
        assert!(lexicons.stopwords.contains("the"));
    }

    #[test]
    fn from_words_normalizes() {
        let lexicon = Lexicon::from_words([" Alpha ", "", "BETA"]);
        assert_eq!(lexicon, Lexicon::from_words(["alpha", "beta"]));
        assert!(!lexicon.is_empty());
    }
}
