//! Media Kit Editor - section/component document editing for media kit pages.
//!
//! A document is an ordered list of sections. Each section has a kind
//! (`hero`, `content`, `features`, `media`, `contact`), a layout that fixes
//! its columns, and components placed in those columns:
//!
//! - **Document model**: normalized store of sections and components with
//!   checked invariants (no orphans, no duplicates, one hero at most)
//! - **Mutation operations**: add/delete/move/duplicate sections and
//!   components; every operation fully succeeds or leaves the document as
//!   it was
//! - **History**: bounded snapshot undo/redo
//! - **Templates**: static section recipes expanded through the ordinary
//!   operations
//! - **Persistence**: whole-document snapshots to Automerge binary or JSON
//!
//! # Example
//!
//! ```rust
//! use mediakit_editor::{EditorConfig, EditorSession, Layout, SectionKind, StaticCatalog};
//!
//! let catalog = StaticCatalog::builtin();
//! let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
//!
//! // Drop in a two-column bio section from the catalog
//! let bio = session.insert_template(&catalog, "bio-with-image", None).unwrap();
//!
//! // Rearrange it; the change is lossy and re-deals components round-robin
//! session.change_layout(&bio, Layout::FullWidth).unwrap();
//!
//! // Only one hero per document
//! session.add_section(SectionKind::Hero, Layout::FullWidth, None).unwrap();
//! assert!(session.add_section(SectionKind::Hero, Layout::FullWidth, None).is_err());
//!
//! // Step back through history
//! session.undo().unwrap();
//! assert_eq!(session.document().section(&bio).unwrap().layout, Layout::FullWidth);
//! ```

pub mod access;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod templates;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use access::{AccessPolicy, AllowAll, DenyPremium};
pub use config::EditorConfig;
pub use document::{
    Column, Component, Direction, Document, Fields, Layout, Placement, Section, SectionKind,
};
pub use error::{EditorError, EditorResult};
pub use history::{HistoryManager, DEFAULT_HISTORY_LIMIT};
pub use registry::{ComponentRegistry, ComponentType, FieldSchema};
pub use render::{DocumentVisitor, OutlineRenderer};
pub use session::{EditorSession, Selection};
pub use store::{AutomergeStore, JsonStore, SnapshotStore};
pub use templates::{ContentOverrides, SectionTemplate, StaticCatalog, TemplateCatalog, TemplateComponent};

#[cfg(feature = "wasm")]
pub use wasm::JsEditorSession;
