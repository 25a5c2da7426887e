//! Type Bible reference triggers through the substitution engine and print
//! what the editor would insert.
//!
//! Usage: cargo run --bin lookup_ref -- [--data PATH] '/창1:1' '/요3:16-17'

use anyhow::{bail, Context, Result};
use holyref::bible::corpus::VerseCorpus;
use holyref::bible::loader::{fetcher_for, CorpusFetcher, FileFetcher};
use holyref::config::Config;
use holyref::services::editor::SermonDocument;
use holyref::services::substitution::SubstitutionEngine;
use holyref::types::CitationNode;
use tracing_subscriber::EnvFilter;

struct Args {
    data: Option<String>,
    triggers: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut data = None;
    let mut triggers = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--data" {
            data = Some(args.next().context("--data needs a path")?);
        } else {
            triggers.push(arg);
        }
    }
    if triggers.is_empty() {
        bail!("usage: lookup_ref [--data PATH] <trigger>...");
    }
    Ok(Args { data, triggers })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let fetcher: Box<dyn CorpusFetcher> = match &args.data {
        Some(path) => Box::new(FileFetcher::new(shellexpand::tilde(path).into_owned())),
        None => {
            let config = Config::load().context("Failed to load config")?;
            fetcher_for(&config).context("No verse dataset available")?
        }
    };

    let records = fetcher
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch verses from {}", fetcher.describe()))?;

    let corpus = VerseCorpus::with_records(records);
    let engine = SubstitutionEngine::new(corpus);

    for trigger in &args.triggers {
        let mut doc = SermonDocument::new();
        let typed = if trigger.ends_with(char::is_whitespace) {
            trigger.clone()
        } else {
            format!("{trigger} ")
        };

        for c in typed.chars() {
            let outcome = engine
                .handle_keystroke(&mut doc, c)
                .with_context(|| format!("Failed to apply {trigger}"))?;
            if !outcome.consumed_input() {
                doc.insert_char(c)?;
            }
        }

        let citations: Vec<&CitationNode> = doc.citations().collect();
        println!("=== {trigger} ===");
        println!("{}", doc.plain_text().trim_end());
        println!("{}", serde_json::to_string_pretty(&citations)?);
    }

    Ok(())
}
