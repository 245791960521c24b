use std::env;
use std::sync::Arc;

use bookdb_core::config::{expand_path, Config};
use bookdb_engine::QueryEngine;
use bookdb_text::TantivyBookStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    let mut bind_addr = config.bind_addr();
    let mut index_dir = config.index_dir();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = args[i + 1].clone();
                    i += 1;
                } else {
                    eprintln!("Error: --bind requires <host:port>");
                    std::process::exit(1);
                }
            }
            "--index" => {
                if i + 1 < args.len() {
                    index_dir = expand_path(&args[i + 1]);
                    i += 1;
                } else {
                    eprintln!("Error: --index requires a path");
                    std::process::exit(1);
                }
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                eprintln!("Usage: bookdb-server [--bind <host:port>] [--index <path>]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !index_dir.exists() {
        eprintln!("❌ Index not found at {}. Run the indexer first:", index_dir.display());
        eprintln!("   cargo run --bin bookdb-indexer");
        std::process::exit(1);
    }

    let store = TantivyBookStore::open(&index_dir)?;
    tracing::info!(
        "opened index at {} ({} documents)",
        index_dir.display(),
        store.num_docs()
    );

    let engine = Arc::new(QueryEngine::new(Arc::new(store)));
    let app = bookdb_api::router(engine);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
