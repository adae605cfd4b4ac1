//! Score command: metrics for one article file.

use article_metrics_core::config::Config;
use article_metrics_core::{MetricValue, analyze_article, compute_metrics};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::{LexiconArgs, read_input_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Article file; the first line is the title unless `--no-title`.
    pub file: Utf8PathBuf,

    /// Treat the whole file as body text.
    #[arg(long)]
    pub no_title: bool,

    #[command(flatten)]
    pub lexicons: LexiconArgs,
}

/// Print the metric record for a single article.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(no_title = args.no_title, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let (lexicons, scorer) = args.lexicons.load(config)?;

    let record = if args.no_title {
        compute_metrics(&content, &lexicons, &scorer)
    } else {
        analyze_article(&content, &lexicons, &scorer)
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    for (name, value) in record.columns() {
        let value = match value {
            MetricValue::Count(n) => n.to_string(),
            MetricValue::Score(x) => format!("{x:.4}"),
        };
        println!("  {} {}", format!("{name:<34}").dimmed(), value);
    }

    Ok(())
}
