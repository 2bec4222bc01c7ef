//! Section templates.
//!
//! This module provides:
//! - `catalog`: template descriptors and the catalogs that supply them
//! - `insert`: expansion of a template into a live section

pub mod catalog;
pub mod insert;

pub use catalog::{SectionTemplate, StaticCatalog, TemplateCatalog, TemplateComponent};
pub use insert::ContentOverrides;
