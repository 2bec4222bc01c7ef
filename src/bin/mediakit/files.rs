//! Reading and writing document files.
//!
//! `.json` files hold serde_json documents; anything else is treated as
//! Automerge binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mediakit_editor::{
    AutomergeStore, Document, EditorConfig, EditorSession, Fields, JsonStore, SnapshotStore,
};

/// On-disk document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Automerge,
}

impl Format {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Automerge,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Automerge => "automerge",
        }
    }
}

/// Loads a document, picking the format from the extension.
///
/// Documents that break a structural invariant or hold no sections are
/// rejected.
pub fn read_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    let bytes = std::fs::read(path).context("Failed to read input file")?;
    parse_document(&bytes, Format::from_path(path))
}

/// Decodes and validates a document in the given format.
pub fn parse_document(bytes: &[u8], format: Format) -> Result<Document> {
    let session = match format {
        Format::Json => {
            let json = std::str::from_utf8(bytes).context("Document JSON is not valid UTF-8")?;
            let mut store = JsonStore::from_json(json);
            EditorSession::load_from(&mut store, EditorConfig::default())
                .context("Failed to load document JSON")?
        }
        Format::Automerge => {
            let mut store =
                AutomergeStore::from_bytes(bytes).context("Failed to load Automerge document")?;
            EditorSession::load_from(&mut store, EditorConfig::default())
                .context("Failed to load Automerge document")?
        }
    };
    Ok(session.into_document())
}

/// Encodes a document, returning the bytes written.
pub fn write_document(path: &Path, document: &Document, format: Format) -> Result<usize> {
    let bytes = match format {
        Format::Json => {
            let mut store = JsonStore::new().pretty();
            store.store(document).context("Failed to encode JSON")?;
            store.into_json().unwrap_or_default().into_bytes()
        }
        Format::Automerge => {
            let mut store = AutomergeStore::new();
            store
                .store(document)
                .context("Failed to encode Automerge document")?;
            store.save()
        }
    };
    std::fs::write(path, &bytes).context("Failed to write output file")?;
    Ok(bytes.len())
}

/// Same path with the extension for `format`.
pub fn with_extension(path: &Path, format: Format) -> PathBuf {
    let mut out = path.to_path_buf();
    out.set_extension(format.extension());
    out
}

/// Reads a flat JSON object of profile fields.
pub fn read_profile(path: &Path) -> Result<Fields> {
    let json = std::fs::read_to_string(path).context("Failed to read profile file")?;
    serde_json::from_str(&json).context("Profile must be a JSON object of string values")
}
