//! build-apiref CLI
//!
//! Builds the API reference JSON consumed by the docs site.
//!
//! # Usage
//!
//! ```bash
//! # Default paths: repo root one level up, output under public/data
//! cargo run --bin build-apiref
//!
//! # Explicit paths with a provenance tag
//! cargo run --bin build-apiref -- \
//!     --repo-root ../tsdecomp \
//!     --out public/data/v1.0.0/api_reference.json \
//!     --source-repo github.com/example/tsdecomp
//! ```

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apiref_core::build_reference;

#[derive(Parser)]
#[command(name = "build-apiref")]
#[command(about = "Build the API reference JSON for the tsdecomp docs site", long_about = None)]
struct Cli {
    /// Repository root containing the tsdecomp package
    #[arg(long, default_value = "..")]
    repo_root: PathBuf,

    /// Output file path
    #[arg(long, default_value = "public/data/v1.0.0/api_reference.json")]
    out: PathBuf,

    /// Source repository recorded in the payload (omitted when empty)
    #[arg(long, default_value = "")]
    source_repo: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let repo_root = fs::canonicalize(&cli.repo_root).unwrap_or_else(|_| cli.repo_root.clone());
    let source_repo = if cli.source_repo.is_empty() {
        None
    } else {
        Some(cli.source_repo.as_str())
    };

    let payload = build_reference(&repo_root, source_repo)?;

    if let Some(parent) = cli.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&cli.out, serde_json::to_string_pretty(&payload)?)?;
    info!(out = %cli.out.display(), "api reference written");
    Ok(())
}
