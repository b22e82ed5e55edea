//! Catalog persistence.
//!
//! The document is written with stable key ordering (struct field order)
//! and 2-space indentation, then swapped into place with a
//! write-temp-then-rename so a concurrent reader never observes a partial
//! file.

use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::catalog::CatalogDocument;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads the previously persisted catalog document.
///
/// A missing file is not an error — it just means this is the first build.
/// A present-but-unreadable file is fatal: silently rebuilding from scratch
/// would discard curated fields.
pub fn load_catalog(path: &Path) -> Result<Option<CatalogDocument>, WriterError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WriterError::Io(e)),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Persists the catalog document, overwriting any previous snapshot.
///
/// Creates missing parent directories. The write is atomic from the
/// caller's perspective: content goes to a randomized temp file in the
/// same directory, is synced, and is then renamed over the destination.
pub fn write_catalog(path: &Path, doc: &CatalogDocument) -> Result<(), WriterError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut content = serde_json::to_vec_pretty(doc)?;
    content.push(b'\n');

    // Randomized temp filename so a concurrent run can't collide with or
    // pre-create our temp path.
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{random_suffix:016x}"));

    let result: Result<(), std::io::Error> = (|| {
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        temp_file.write_all(&content)?;
        temp_file.sync_all()?;
        drop(temp_file);
        std::fs::rename(&temp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result.map_err(WriterError::Io)
}
