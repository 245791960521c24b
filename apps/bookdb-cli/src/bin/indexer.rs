use std::env;
use std::path::PathBuf;

use bookdb_core::config::{expand_path, Config};
use bookdb_core::corpus;
use bookdb_text::BookIndexer;

fn print_usage() {
    println!("Usage: bookdb-indexer [OPTIONS] [CORPUS_DIR]");
    println!();
    println!("Options:");
    println!("  --dir, -d <PATH>   Corpus directory (overrides config)");
    println!("  --index <PATH>     Index directory (overrides config)");
    println!("  --help, -h         Show this help");
    println!();
    println!("Reads every .json/.jsonl file under the corpus directory and");
    println!("builds a fresh search index. An existing index is replaced.");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let mut corpus_dir: Option<PathBuf> = None;
    let mut index_dir: Option<PathBuf> = None;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    corpus_dir = Some(expand_path(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --dir requires a path");
                    std::process::exit(1);
                }
            }
            "--index" => {
                if i + 1 < args.len() {
                    index_dir = Some(expand_path(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --index requires a path");
                    std::process::exit(1);
                }
            }
            other if !other.starts_with('-') => {
                // Bare positional argument doubles as the corpus directory.
                corpus_dir = Some(expand_path(other));
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let corpus_dir = corpus_dir.unwrap_or_else(|| config.corpus_dir());
    let index_dir = index_dir.unwrap_or_else(|| config.index_dir());

    println!("🚀 Book catalog indexer");
    println!("📁 Corpus: {}", corpus_dir.display());
    println!("📁 Index:  {}", index_dir.display());
    println!();

    let docs = corpus::load_dir(&corpus_dir)?;
    if docs.is_empty() {
        println!("⚠️  No documents found under {}", corpus_dir.display());
        return Ok(());
    }
    println!("📄 Loaded {} documents", docs.len());

    let indexer = BookIndexer::create(index_dir.clone())?;
    let indexed = indexer.index_documents(&docs)?;

    println!("📊 Indexed {} documents", indexed);
    if indexed < docs.len() {
        println!("⚠️  Skipped {} duplicates", docs.len() - indexed);
    }
    println!("✅ Indexing completed successfully!");
    println!();
    println!("💡 To serve the catalog over HTTP:");
    println!("   cargo run --bin bookdb-server");
    println!("💡 To search interactively:");
    println!("   cargo run --bin bookdb-search");

    Ok(())
}
