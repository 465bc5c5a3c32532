//! Output files: the two CSV tables, the product URL list and the
//! diagnostic page snapshot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shelfscout_core::{ListingRecord, ProductRecord, LISTING_HEADERS, PRODUCT_HEADERS};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PersistError {
    #[error("failed to write table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_owned(),
            source,
        }
    }

    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Writes `rows` under an explicit header row, so an empty table still
/// carries its headers.
fn write_table<R: Serialize>(path: &Path, headers: &[&str], rows: &[R]) -> Result<(), PersistError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| PersistError::csv(path, e))?;
    writer
        .write_record(headers)
        .map_err(|e| PersistError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| PersistError::csv(path, e))?;
    }
    writer.flush().map_err(|e| PersistError::io(path, e))
}

pub(crate) fn write_listing_table(path: &Path, rows: &[ListingRecord]) -> Result<(), PersistError> {
    write_table(path, &LISTING_HEADERS, rows)
}

pub(crate) fn write_product_table(path: &Path, rows: &[ProductRecord]) -> Result<(), PersistError> {
    write_table(path, &PRODUCT_HEADERS, rows)
}

/// One URL per line, newline-terminated.
pub(crate) fn write_url_list(path: &Path, urls: &[String]) -> Result<(), PersistError> {
    let mut body = String::new();
    for url in urls {
        body.push_str(url);
        body.push('\n');
    }
    std::fs::write(path, body).map_err(|e| PersistError::io(path, e))
}

pub(crate) fn write_snapshot(path: &Path, html: &str) -> Result<(), PersistError> {
    std::fs::write(path, html).map_err(|e| PersistError::io(path, e))
}

/// Reads a URL list: lines are trimmed and blank lines skipped. A missing
/// file reads as an empty list.
pub(crate) fn read_url_list(path: &Path) -> Result<Vec<String>, PersistError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "URL list not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(PersistError::io(path, e)),
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod tests;
