//! Document serialization and sink writing.
//!
//! The document is serialized fully before the sink is touched, so a write
//! failure never leaves a half-valid file behind. There is no retry; a sink
//! error aborts the invocation and the in-progress document is discarded.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::json_output::JsonPathTrace;

/// Errors that can occur while emitting the output document
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write document to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write document to sink: {0}")]
    Sink(std::io::Error),
}

/// Result type for document export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Serialize the path records as one JSON array.
pub fn documents_to_json(records: &[JsonPathTrace], compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(records)?
    } else {
        serde_json::to_string_pretty(records)?
    };
    Ok(json)
}

/// Write the document to an arbitrary sink, with a trailing newline.
pub fn write_documents<W: Write>(
    sink: &mut W,
    records: &[JsonPathTrace],
    compact: bool,
) -> Result<()> {
    let json = documents_to_json(records, compact)?;
    sink.write_all(json.as_bytes()).map_err(ExportError::Sink)?;
    sink.write_all(b"\n").map_err(ExportError::Sink)?;
    sink.flush().map_err(ExportError::Sink)?;
    Ok(())
}

/// Write the document to a file path.
///
/// Serialization happens before the file is created, so a serialization
/// failure leaves no file behind.
pub fn write_documents_to_file<P: AsRef<Path>>(
    path: P,
    records: &[JsonPathTrace],
    compact: bool,
) -> Result<()> {
    let path = path.as_ref();
    let json = documents_to_json(records, compact)?;

    let map_err = |source| ExportError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(map_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(json.as_bytes()).map_err(map_err)?;
    writer.write_all(b"\n").map_err(map_err)?;
    writer.flush().map_err(map_err)?;

    tracing::info!("wrote {} path record(s) to {}", records.len(), path.display());
    Ok(())
}
