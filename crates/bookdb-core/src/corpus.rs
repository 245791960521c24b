//! Corpus loading for ingest: JSON and JSONL files under a directory.

use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load every catalog document under `dir`, in sorted file order.
///
/// `.json` files hold a single object or an array of documents;
/// `.jsonl` files hold one document per non-empty line. Unreadable
/// files and malformed documents are skipped with a warning so one bad
/// file cannot abort an ingest run.
pub fn load_dir(dir: &Path) -> anyhow::Result<Vec<Value>> {
    if !dir.is_dir() {
        anyhow::bail!("corpus directory does not exist: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("json" | "jsonl")
            )
        })
        .collect();
    files.sort();

    let mut docs = Vec::new();
    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("skipping unreadable file {}: {err}", path.display());
                continue;
            }
        };
        if path.extension().and_then(|ext| ext.to_str()) == Some("jsonl") {
            for (line_no, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<Value>(line) {
                    Ok(doc) => docs.push(doc),
                    Err(err) => tracing::warn!(
                        "skipping malformed document at {}:{}: {err}",
                        path.display(),
                        line_no + 1
                    ),
                }
            }
        } else {
            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Array(items)) => docs.extend(items),
                Ok(doc) => docs.push(doc),
                Err(err) => {
                    tracing::warn!("skipping malformed file {}: {err}", path.display());
                }
            }
        }
    }
    Ok(docs)
}
