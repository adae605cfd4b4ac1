//! Analyze command: metrics for every stored article in the input table.

use anyhow::Context;
use article_metrics_core::config::Config;
use article_metrics_core::{ArticleStore, OutputSchema, pipeline, table};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{LexiconArgs, progress_bar, read_input_table};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input table with a header row (CSV, or the first sheet of an `.xlsx`).
    #[arg(short, long, value_name = "FILE")]
    pub input: Utf8PathBuf,

    /// Report to write: a workbook for `.xlsx` paths, CSV otherwise.
    #[arg(short, long, value_name = "FILE")]
    pub output: Utf8PathBuf,

    /// Also write the report as a JSON array.
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<Utf8PathBuf>,

    /// File whose first line is the comma-separated report header.
    ///
    /// Without it the report has the input columns followed by every metric.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<Utf8PathBuf>,

    /// Directory of stored `<id>.txt` articles.
    #[arg(long, value_name = "DIR")]
    pub articles_dir: Option<Utf8PathBuf>,

    /// Identifier column of the input table.
    #[arg(long, value_name = "NAME")]
    pub id_column: Option<String>,

    #[command(flatten)]
    pub lexicons: LexiconArgs,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput {
    analyzed: usize,
    missing: Vec<String>,
    output: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    json_output: Option<Utf8PathBuf>,
}

/// Analyze all articles listed in the input table and write the report.
#[instrument(name = "cmd_analyze", skip_all, fields(input = %args.input))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(output = %args.output, schema = ?args.schema, "executing analyze command");

    let input = read_input_table(&args.input, max_input_bytes)?;
    let id_column = args.id_column.as_deref().unwrap_or(config.id_column());
    input.require_column(id_column)?;

    let schema = match &args.schema {
        Some(path) => {
            table::read_schema(path).with_context(|| format!("failed to read schema {path}"))?
        }
        None => OutputSchema::from_input_columns(input.columns.iter().cloned()),
    };

    let (lexicons, scorer) = args.lexicons.load(config)?;
    let store = ArticleStore::new(
        args.articles_dir
            .clone()
            .unwrap_or_else(|| config.articles_dir().to_path_buf()),
    );

    let bar = progress_bar(input.len(), quiet || global_json);
    let report = pipeline::analyze_batch_with(
        &input.records,
        &store,
        &lexicons,
        &scorer,
        &schema,
        id_column,
        |id| {
            bar.set_message(id.to_string());
            bar.inc(1);
        },
    );
    bar.finish_and_clear();

    table::write_report(&args.output, &schema, &report.rows)
        .with_context(|| format!("failed to write {}", args.output))?;
    if let Some(path) = &args.json_output {
        table::write_json(path, &schema, &report.rows)
            .with_context(|| format!("failed to write {path}"))?;
    }

    let summary = report.summary();
    info!(
        analyzed = summary.analyzed,
        missing = summary.missing,
        "analysis complete"
    );

    let output = AnalyzeOutput {
        analyzed: summary.analyzed,
        missing: report.missing,
        output: args.output,
        json_output: args.json_output,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} articles → {}",
        "Analyzed".green().bold(),
        output.analyzed,
        output.output.cyan()
    );
    if let Some(path) = &output.json_output {
        println!("{}: {}", "JSON report".dimmed(), path.cyan());
    }
    if !output.missing.is_empty() && !quiet {
        println!(
            "{} {} without a readable article: {}",
            "Skipped".yellow().bold(),
            output.missing.len(),
            output.missing.join(", ")
        );
    }

    Ok(())
}
