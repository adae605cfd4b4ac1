//! The per-article analysis loop.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::lexicon::Lexicons;
use crate::metrics;
use crate::report::{self, InputRecord, OutputRow, OutputSchema};
use crate::sentiment::SentimentScorer;
use crate::store::ArticleStore;

/// Result of analyzing a batch of input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// One row per analyzed article, in input order.
    pub rows: Vec<OutputRow>,
    /// Identifiers whose article was absent or unreadable, in input order.
    pub missing: Vec<String>,
}

impl BatchReport {
    /// Counts for status output.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            analyzed: self.rows.len(),
            missing: self.missing.len(),
        }
    }
}

/// Row counts of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Rows written.
    pub analyzed: usize,
    /// Records skipped for lack of a readable article.
    pub missing: usize,
}

/// Analyze every record whose article is in `store`.
///
/// Records are processed strictly in order. A record with no stored article,
/// an empty or unusable identifier, or an article file that cannot be read is
/// skipped with a warning and listed in [`BatchReport::missing`]. The batch
/// itself never fails.
pub fn analyze_batch(
    records: &[InputRecord],
    store: &ArticleStore,
    lexicons: &Lexicons,
    scorer: &dyn SentimentScorer,
    schema: &OutputSchema,
    id_column: &str,
) -> BatchReport {
    analyze_batch_with(records, store, lexicons, scorer, schema, id_column, |_| {})
}

/// [`analyze_batch`] that calls `on_record` with each identifier once it
/// has been handled.
#[tracing::instrument(skip_all, fields(records = records.len(), store = %store.dir()))]
pub fn analyze_batch_with(
    records: &[InputRecord],
    store: &ArticleStore,
    lexicons: &Lexicons,
    scorer: &dyn SentimentScorer,
    schema: &OutputSchema,
    id_column: &str,
    mut on_record: impl FnMut(&str),
) -> BatchReport {
    let mut batch = BatchReport::default();

    for record in records {
        let id = record.get(id_column).unwrap_or_default().trim();
        let article = match store.load_text(id) {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                warn!(id, "article not found, skipping");
                None
            }
            Err(StoreError::InvalidId(_)) => {
                warn!(id, "unusable article identifier, skipping");
                None
            }
            Err(e) => {
                warn!(id, error = %e, "article unreadable, skipping");
                None
            }
        };
        let Some(article) = article else {
            batch.missing.push(id.to_string());
            on_record(id);
            continue;
        };

        let record_metrics = metrics::analyze_article(&article, lexicons, scorer);
        debug!(id, word_count = record_metrics.word_count, "article analyzed");
        batch
            .rows
            .push(report::build_row(schema, record, &record_metrics));
        on_record(id);
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::report::Cell;
    use crate::sentiment::Sentiment;
    use crate::store::Article;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    struct Neutral;

    impl SentimentScorer for Neutral {
        fn score(&self, _text: &str) -> Sentiment {
            Sentiment::default()
        }
    }

    fn store(tmp: &TempDir) -> ArticleStore {
        let store = ArticleStore::new(Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap());
        for (id, body) in [("a", "Good news. We won."), ("c", "Bad day for us.")] {
            store
                .save(&Article {
                    id: id.to_string(),
                    title: format!("Title {id}"),
                    body: body.to_string(),
                })
                .unwrap();
        }
        store
    }

    fn lexicons() -> Lexicons {
        Lexicons {
            positive: Lexicon::from_words(["good", "won"]),
            negative: Lexicon::from_words(["bad"]),
            stopwords: Lexicon::from_words(["for"]),
        }
    }

    fn records(ids: &[&str]) -> Vec<InputRecord> {
        ids.iter()
            .map(|id| InputRecord::new([("URL_ID", *id), ("URL", "https://e.com")]))
            .collect()
    }

    #[test]
    fn missing_articles_skipped_in_order() {
        let tmp = TempDir::new().unwrap();
        let schema = OutputSchema::from_input_columns(["URL_ID", "URL"]);
        let report = analyze_batch(
            &records(&["c", "b", "a", ""]),
            &store(&tmp),
            &lexicons(),
            &Neutral,
            &schema,
            "URL_ID",
        );

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].cells()[0], Cell::Text("c".to_string()));
        assert_eq!(report.rows[1].cells()[0], Cell::Text("a".to_string()));
        assert_eq!(report.missing, vec!["b", ""]);
        assert_eq!(
            report.summary(),
            BatchSummary {
                analyzed: 2,
                missing: 2
            }
        );
    }

    #[test]
    fn rows_carry_metrics() {
        let tmp = TempDir::new().unwrap();
        let schema = OutputSchema::new(["URL_ID", "POSITIVE SCORE", "NEGATIVE SCORE", "PERSONAL PRONOUNS"]);
        let report = analyze_batch(
            &records(&["a", "c"]),
            &store(&tmp),
            &lexicons(),
            &Neutral,
            &schema,
            "URL_ID",
        );

        let rendered: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| r.cells().iter().map(ToString::to_string).collect())
            .collect();
        assert_eq!(rendered[0], vec!["a", "2", "0", "1"]);
        assert_eq!(rendered[1], vec!["c", "0", "1", "1"]);
    }

    #[test]
    fn progress_sees_every_record() {
        let tmp = TempDir::new().unwrap();
        let mut seen = Vec::new();
        analyze_batch_with(
            &records(&["a", "zz", "c"]),
            &store(&tmp),
            &lexicons(),
            &Neutral,
            &OutputSchema::new(["URL_ID"]),
            "URL_ID",
            |id| seen.push(id.to_string()),
        );
        assert_eq!(seen, vec!["a", "zz", "c"]);
    }

    #[test]
    fn latin1_article_analyzed_and_unreadable_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        std::fs::write(tmp.path().join("l1.txt"), b"Caf\xe9 news\nGood caf\xe9. We won.").unwrap();
        std::fs::create_dir(tmp.path().join("broken.txt")).unwrap();

        let report = analyze_batch(
            &records(&["l1", "broken", "a"]),
            &store,
            &lexicons(),
            &Neutral,
            &OutputSchema::new(["URL_ID", "POSITIVE SCORE"]),
            "URL_ID",
        );

        let rendered: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| r.cells().iter().map(ToString::to_string).collect())
            .collect();
        assert_eq!(rendered, vec![vec!["l1", "2"], vec!["a", "2"]]);
        assert_eq!(report.missing, vec!["broken"]);
    }
}
