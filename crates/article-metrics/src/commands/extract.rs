//! Extract command: fetch every URL in the input table into the article store.

use anyhow::Context;
use article_metrics_core::config::Config;
use article_metrics_core::extract::{ArticleFetcher, FetchConfig};
use article_metrics_core::table::InputTable;
use article_metrics_core::{Article, ArticleStore};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::{progress_bar, read_input_table};

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input table with a header row (CSV, or the first sheet of an `.xlsx`).
    #[arg(short, long, value_name = "FILE")]
    pub input: Utf8PathBuf,

    /// Directory to write `<id>.txt` articles into.
    #[arg(long, value_name = "DIR")]
    pub articles_dir: Option<Utf8PathBuf>,

    /// HTTP timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header for requests.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Identifier column of the input table.
    #[arg(long, value_name = "NAME")]
    pub id_column: Option<String>,

    /// URL column of the input table.
    #[arg(long, value_name = "NAME")]
    pub url_column: Option<String>,
}

/// One article that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractFailure {
    /// Record identifier.
    pub id: String,
    /// URL that was requested.
    pub url: String,
    /// Why it failed.
    pub error: String,
}

/// Outcome of an extraction batch.
#[derive(Debug, Default, Serialize)]
pub struct ExtractSummary {
    /// Identifiers written to the store, in input order.
    pub saved: Vec<String>,
    /// Records that produced no article.
    pub failed: Vec<ExtractFailure>,
}

/// Fetch and store every article listed in the input table.
#[instrument(name = "cmd_extract", skip_all, fields(input = %args.input))]
pub fn cmd_extract(
    args: ExtractArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let input = read_input_table(&args.input, max_input_bytes)?;
    let id_column = args.id_column.as_deref().unwrap_or(config.id_column());
    let url_column = args.url_column.as_deref().unwrap_or(config.url_column());
    input.require_column(id_column)?;
    input.require_column(url_column)?;

    let defaults = config.fetch_config();
    let fetch_config = FetchConfig {
        timeout: args.timeout.unwrap_or(defaults.timeout),
        user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
    };
    debug!(timeout = fetch_config.timeout, "executing extract command");

    let fetcher = ArticleFetcher::new(&fetch_config).context("failed to build HTTP client")?;
    let store = ArticleStore::new(
        args.articles_dir
            .clone()
            .unwrap_or_else(|| config.articles_dir().to_path_buf()),
    );

    let bar = progress_bar(input.len(), quiet || global_json);
    let summary = extract_batch(&input, id_column, url_column, &fetcher, &store, &bar);
    bar.finish_and_clear();

    info!(
        saved = summary.saved.len(),
        failed = summary.failed.len(),
        "extraction complete"
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} articles → {}",
        "Extracted".green().bold(),
        summary.saved.len(),
        store.dir().cyan()
    );
    if !quiet {
        for failure in &summary.failed {
            println!(
                "{} {} ({}): {}",
                "FAILED".red().bold(),
                failure.id,
                failure.url.dimmed(),
                failure.error
            );
        }
    }

    Ok(())
}

/// Fetch each record's URL in order and save the article under its id.
///
/// Failures are logged and collected; the batch always runs to the end.
pub fn extract_batch(
    input: &InputTable,
    id_column: &str,
    url_column: &str,
    fetcher: &ArticleFetcher,
    store: &ArticleStore,
    bar: &ProgressBar,
) -> ExtractSummary {
    let mut summary = ExtractSummary::default();

    for record in &input.records {
        let id = record.get(id_column).unwrap_or_default().trim();
        let url = record.get(url_column).unwrap_or_default().trim();
        bar.set_message(id.to_string());

        let result = if url.is_empty() {
            Err("no URL".to_string())
        } else {
            fetcher
                .fetch_article(url)
                .map_err(|e| e.to_string())
                .and_then(|extracted| {
                    let article = Article {
                        id: id.to_string(),
                        title: extracted.title,
                        body: extracted.body,
                    };
                    store.save(&article).map_err(|e| e.to_string())
                })
        };

        match result {
            Ok(path) => {
                debug!(id, %path, "article saved");
                summary.saved.push(id.to_string());
            }
            Err(error) => {
                warn!(id, url, %error, "extraction failed");
                summary.failed.push(ExtractFailure {
                    id: id.to_string(),
                    url: url.to_string(),
                    error,
                });
            }
        }
        bar.inc(1);
    }

    summary
}
