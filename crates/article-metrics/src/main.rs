//! article-metrics CLI
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use article_metrics::{Cli, Commands, commands};
use article_metrics_core::config::{Config, ConfigLoader, ConfigSources};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_ref())?;

    let log_dir = config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf());
    let _guard = observability::init_observability(
        &observability::ObservabilityConfig::from_env_with_overrides(log_dir),
        observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str()),
    )
    .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        config_file = ?sources.primary_file(),
        "CLI initialized"
    );

    let limit = config.input_limit();
    let result = match command {
        #[cfg(feature = "fetch")]
        Commands::Extract(args) => {
            commands::extract::cmd_extract(args, cli.json, cli.quiet, &config, limit)
        }
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, cli.json, cli.quiet, &config, limit)
        }
        Commands::Score(args) => commands::score::cmd_score(args, cli.json, &config, limit),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
    };
    if let Err(err) = &result {
        tracing::error!(error = format!("{err:#}"), "command failed");
    }
    result
}

/// Discover project config from the working directory, then apply `--config`.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.clone(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}
