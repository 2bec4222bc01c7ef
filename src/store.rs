//! Snapshot persistence.
//!
//! The editor hands whole [`Document`] snapshots to a [`SnapshotStore`] and
//! gets whole documents back; when and where to save is the caller's call.
//! Two stores ship with the crate:
//! - [`AutomergeStore`]: Automerge binary via autosurgeon reconcile/hydrate
//! - [`JsonStore`]: a serde_json string

use automerge::{AutoCommit, ChangeHash};
use autosurgeon::{hydrate, reconcile};

use crate::document::Document;
use crate::error::{EditorError, EditorResult};

/// Accepts and returns full document snapshots.
pub trait SnapshotStore {
    /// Persists a snapshot, replacing whatever was stored before.
    fn store(&mut self, doc: &Document) -> EditorResult<()>;

    /// Returns the stored snapshot.
    fn load(&mut self) -> EditorResult<Document>;
}

// =============================================================================
// AUTOMERGE
// =============================================================================

/// Automerge-backed snapshot store.
///
/// Each `store` reconciles the snapshot into the Automerge document, so only
/// the differences from the previous snapshot are recorded as changes.
///
/// # Caching Strategy
///
/// `cached_state` holds the last stored or hydrated document and is dropped
/// whenever raw bytes are loaded.
pub struct AutomergeStore {
    doc: AutoCommit,
    /// Cached hydrated state.
    cached_state: Option<Document>,
}

impl AutomergeStore {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty store. Nothing can be loaded until a snapshot has
    /// been stored.
    pub fn new() -> Self {
        Self {
            doc: AutoCommit::new(),
            cached_state: None,
        }
    }

    /// Creates a store from saved binary data.
    pub fn from_bytes(bytes: &[u8]) -> EditorResult<Self> {
        let doc = AutoCommit::load(bytes)?;
        Ok(Self {
            doc,
            cached_state: None,
        })
    }

    /// Saves the Automerge document to binary format.
    pub fn save(&mut self) -> Vec<u8> {
        self.doc.save()
    }

    /// Returns the current heads.
    pub fn get_heads(&mut self) -> Vec<ChangeHash> {
        self.doc.get_heads()
    }

    /// Gets the actor ID for this document instance.
    pub fn actor_id(&self) -> String {
        self.doc.get_actor().to_hex_string()
    }

    /// Returns true once a snapshot has been stored or loaded.
    pub fn has_snapshot(&mut self) -> bool {
        self.cached_state.is_some() || !self.doc.get_heads().is_empty()
    }

    /// Hydrates the stored document.
    pub fn get_state(&mut self) -> EditorResult<Document> {
        if let Some(ref cached) = self.cached_state {
            return Ok(cached.clone());
        }
        if !self.has_snapshot() {
            return Err(EditorError::serialization("no snapshot stored"));
        }
        let state: Document = hydrate(&self.doc)?;
        self.cached_state = Some(state.clone());
        Ok(state)
    }
}

impl Default for AutomergeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for AutomergeStore {
    fn store(&mut self, doc: &Document) -> EditorResult<()> {
        reconcile(&mut self.doc, doc)?;
        self.cached_state = Some(doc.clone());
        Ok(())
    }

    fn load(&mut self) -> EditorResult<Document> {
        self.get_state()
    }
}

// =============================================================================
// JSON
// =============================================================================

/// JSON snapshot store held in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    json: Option<String>,
    pretty: bool,
}

impl JsonStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON snapshot.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            pretty: false,
        }
    }

    /// Builder: Pretty-print stored JSON.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// The stored JSON, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// Consumes the store, returning the stored JSON.
    pub fn into_json(self) -> Option<String> {
        self.json
    }
}

impl SnapshotStore for JsonStore {
    fn store(&mut self, doc: &Document) -> EditorResult<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        self.json = Some(json);
        Ok(())
    }

    fn load(&mut self) -> EditorResult<Document> {
        let json = self
            .json
            .as_deref()
            .ok_or_else(|| EditorError::serialization("no snapshot stored"))?;
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
