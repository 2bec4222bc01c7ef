//! Document module.
//!
//! Provides the section/component document model, the layout engine and the
//! mutation operations that keep the document's invariants intact.

pub mod layout;
pub mod model;
pub mod ops;

// Re-exports for convenience
pub use layout::{redistribute, Layout, SectionKind};
pub use model::{Column, Component, Document, Fields, Placement, Section};
pub use ops::Direction;
