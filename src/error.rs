//! Error types for the media kit document editor.

use thiserror::Error;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while editing, persisting or loading a document.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The requested layout is not permitted for the section kind.
    #[error("Layout '{layout}' is not allowed for '{kind}' sections")]
    InvalidLayout { kind: String, layout: String },

    /// A second instance of a single-instance section kind was requested.
    #[error("Only one '{0}' section is allowed per document")]
    SingleInstanceViolation(String),

    /// Attempt to delete the only remaining section.
    #[error("Cannot delete the last section of a document")]
    LastSectionViolation,

    /// Section not found in the document.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Column not found in a section.
    #[error("Column '{column}' not found in section {section}")]
    ColumnNotFound { section: String, column: String },

    /// Component not found in the document.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Template not found in the catalog.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Undo history is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo history is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// The access policy refused a template or component type.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// A loaded or constructed document breaks a structural invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A string did not name a known layout or section kind.
    #[error("Unknown {what}: '{value}'")]
    UnknownVariant { what: &'static str, value: String },

    /// Automerge error during persistence.
    #[error("Automerge error: {0}")]
    Automerge(#[from] automerge::AutomergeError),

    /// Autosurgeon hydration error.
    #[error("Hydration error: {0}")]
    Hydrate(#[from] autosurgeon::HydrateError),

    /// Autosurgeon reconcile error.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] autosurgeon::ReconcileError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EditorError {
    /// Creates an InvalidLayout error.
    pub fn invalid_layout(kind: impl ToString, layout: impl ToString) -> Self {
        Self::InvalidLayout {
            kind: kind.to_string(),
            layout: layout.to_string(),
        }
    }

    /// Creates a SingleInstanceViolation error.
    pub fn single_instance(kind: impl ToString) -> Self {
        Self::SingleInstanceViolation(kind.to_string())
    }

    /// Creates a SectionNotFound error.
    pub fn section_not_found(id: impl Into<String>) -> Self {
        Self::SectionNotFound(id.into())
    }

    /// Creates a ColumnNotFound error.
    pub fn column_not_found(section: impl Into<String>, column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            section: section.into(),
            column: column.into(),
        }
    }

    /// Creates a ComponentNotFound error.
    pub fn component_not_found(id: impl Into<String>) -> Self {
        Self::ComponentNotFound(id.into())
    }

    /// Creates a TemplateNotFound error.
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound(id.into())
    }

    /// Creates an AccessDenied error.
    pub fn access_denied(what: impl Into<String>) -> Self {
        Self::AccessDenied(what.into())
    }

    /// Creates an InvariantViolation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Creates an UnknownVariant error.
    pub fn unknown_variant(what: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            what,
            value: value.into(),
        }
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
