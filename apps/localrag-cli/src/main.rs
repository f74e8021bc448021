//! `localrag`: chat with a local text file.
//!
//! Usage:
//!   localrag chat --file notes.txt            # interactive retrieval loop
//!   localrag chat --file notes.txt --answer   # also generate answers (needs OPENAI_API_KEY)
//!   localrag search --file notes.txt --json "what is rag?"

mod answer;
mod chat;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use localrag_core::config::{expand_path, Config, Settings};
use localrag_core::loader::load_text;
use localrag_retrieve::Retriever;
use localrag_text::{TfidfOptions, TfidfVectorizer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "localrag", version, about = "Keyword-weighted retrieval over a local text file")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat with the provided text file
    Chat {
        #[command(flatten)]
        source: SourceArgs,

        /// Generate an answer from the retrieved context (needs OPENAI_API_KEY)
        #[arg(long)]
        answer: bool,
    },
    /// Run a single query and print the ranked chunks
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        query: String,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to the input text file (defaults to `data.file` from config)
    #[arg(long)]
    file: Option<String>,

    /// Number of chunks to retrieve per query
    #[arg(short, long)]
    k: Option<usize>,

    /// Maximum characters per chunk
    #[arg(long)]
    max_chars: Option<usize>,

    /// Characters shared by consecutive chunks
    #[arg(long)]
    overlap: Option<usize>,
}

impl SourceArgs {
    /// Flags win over config values. The merged settings are validated again.
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(file) = &self.file {
            settings.data.file = file.clone();
        }
        if let Some(k) = self.k {
            settings.retrieval.top_k = k;
        }
        if let Some(max_chars) = self.max_chars {
            settings.chunking.max_chars = max_chars;
        }
        if let Some(overlap) = self.overlap {
            settings.chunking.overlap = overlap;
        }
        settings.validate()?;
        Ok(())
    }
}

/// Load, chunk and index `path` with the configured chunker and weighting.
pub fn build_retriever(path: &std::path::Path, settings: &Settings) -> Result<Retriever<TfidfVectorizer>> {
    let text = load_text(path)?;
    let chunks = settings.chunking.chunker()?.split(&text);
    let vectorizer = TfidfVectorizer::with_options(TfidfOptions {
        sublinear_tf: settings.index.sublinear_tf,
        smooth_idf: settings.index.smooth_idf,
    })?;
    let mut retriever = Retriever::new(vectorizer);
    retriever.index(&chunks)?;
    tracing::info!(path = %path.display(), chunks = retriever.len(), "indexed file");
    Ok(retriever)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "localrag=debug,localrag_core=debug,localrag_text=debug,localrag_retrieve=debug"
    } else {
        "warn,localrag=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let mut settings = config.settings()?;

    match cli.command {
        Command::Chat { source, answer } => {
            source.apply(&mut settings)?;
            let path: PathBuf = expand_path(&settings.data.file);
            chat::run_chat(&path, &settings, answer)
        }
        Command::Search { source, json, query } => {
            source.apply(&mut settings)?;
            let path: PathBuf = expand_path(&settings.data.file);
            chat::run_search(&path, &settings, &query, json)
        }
    }
}
