//! Release artifact generation for article-metrics.
//!
//! ```text
//! cargo xtask man [--out-dir DIR]
//! cargo xtask completions [--out-dir DIR]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

const BIN_NAME: &str = "article-metrics";

#[derive(Parser)]
#[command(name = "xtask", about = "Build helpers for article-metrics")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and every subcommand.
    Man {
        /// Output directory.
        #[arg(long, default_value = "target/dist/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts.
    Completions {
        /// Output directory.
        #[arg(long, default_value = "target/dist/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = article_metrics::command().name(BIN_NAME);
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = article_metrics::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, out_dir)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
