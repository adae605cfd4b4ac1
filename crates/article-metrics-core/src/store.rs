//! On-disk article store.
//!
//! One UTF-8 text file per article, named `<id>.txt`. The first line is the
//! title and the rest is the body. Files that are not valid UTF-8 are read
//! as Latin-1.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::lexicon::decode_permissive;
use crate::text;

/// An article as extracted from the web.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Identifier from the input table.
    pub id: String,
    /// Headline; empty when the page had none.
    pub title: String,
    /// Article text, paragraphs separated by newlines.
    pub body: String,
}

impl Article {
    /// Parse stored text: first line title, remainder body.
    pub fn from_stored(id: impl Into<String>, text: &str) -> Self {
        let (title, body) = text::split_title(text);
        Self {
            id: id.into(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    /// Text as written to the store.
    pub fn to_stored(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Directory of `<id>.txt` article files.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: Utf8PathBuf,
}

impl ArticleStore {
    /// Open a store rooted at `dir`. The directory need not exist yet.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of the file for `id`.
    pub fn path_for(&self, id: &str) -> StoreResult<Utf8PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.txt")))
    }

    /// Load the raw stored text for `id`.
    ///
    /// A missing file is `Ok(None)`: callers skip the article instead of
    /// failing the batch.
    pub fn load_text(&self, id: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(id)?;
        match std::fs::read(path.as_std_path()) {
            Ok(bytes) => Ok(Some(decode_permissive(bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Load and parse the article for `id`.
    pub fn load(&self, id: &str) -> StoreResult<Option<Article>> {
        Ok(self
            .load_text(id)?
            .map(|text| Article::from_stored(id, &text)))
    }

    /// Write an article, creating the store directory if needed.
    #[tracing::instrument(skip_all, fields(id = %article.id))]
    pub fn save(&self, article: &Article) -> StoreResult<Utf8PathBuf> {
        let path = self.path_for(&article.id)?;
        std::fs::create_dir_all(self.dir.as_std_path()).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(path.as_std_path(), article.to_stored()).map_err(|source| {
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })?;
        debug!(path = %path, bytes = article.body.len(), "saved article");
        Ok(path)
    }
}

fn validate_id(id: &str) -> StoreResult<()> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}
