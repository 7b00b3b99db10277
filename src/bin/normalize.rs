//! Catalog Normalizer CLI
//!
//! Formats every repository record in a local code.json file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use codegov_metadata::{get_code_json_repos, parse_catalog, NormalizerConfig, RepoFormatter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codegov-normalize")]
#[command(about = "Normalize code.json repository records")]
struct Cli {
    /// Path to a code.json catalog document
    input: PathBuf,

    /// Config file layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a summary table instead of JSON lines
    #[arg(long)]
    summary: bool,

    /// Exit non-zero when any record fails to format
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = NormalizerConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let doc = parse_catalog(&text).with_context(|| format!("parsing {}", cli.input.display()))?;

    let formatter = RepoFormatter::new(config.usage.clone());
    let report = formatter.format_catalog(&doc)?;
    tracing::info!(
        version = %report.version,
        formatted = report.repos.len(),
        failed = report.failures.len(),
        "catalog formatted"
    );

    if cli.summary {
        // Scores and usage codes come from the raw records, so walk them in step.
        let raw_repos = get_code_json_repos(&doc).map(Vec::as_slice).unwrap_or(&[]);
        let failed: Vec<usize> = report.failures.iter().map(|(i, _)| *i).collect();
        let raw_ok = raw_repos
            .iter()
            .enumerate()
            .filter(|(i, _)| !failed.contains(i))
            .map(|(_, raw)| raw);

        println!("{:<60} {:>5} {:>7}", "repoID", "usage", "score");
        for (repo, raw) in report.repos.iter().zip(raw_ok) {
            let score = config.weights.score_repository(raw);
            println!(
                "{:<60} {:>5} {:>6.1}%",
                repo.repo_id().unwrap_or("-"),
                formatter.usage_code(raw),
                score.ratio() * 100.0
            );
        }
    } else {
        for repo in &report.repos {
            println!("{}", serde_json::to_string(repo)?);
        }
    }

    for (index, err) in &report.failures {
        eprintln!("record {}: {}", index, err);
    }

    if cli.strict && !report.failures.is_empty() {
        anyhow::bail!("{} record(s) failed to format", report.failures.len());
    }
    Ok(())
}
