//! Data model for media kit documents.
//!
//! A [`Document`] is an ordered list of sections plus a normalized component
//! store. Sections reference components by ID through their columns; the
//! store is the only place component data lives.
//!
//! These structs use autosurgeon derives for Automerge persistence and serde
//! derives for JSON.

use std::collections::{HashMap, HashSet};

use autosurgeon::{Hydrate, Reconcile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::{redistribute, Layout, SectionKind};
use crate::error::{EditorError, EditorResult};

/// Field name -> value map used for component content, component styles and
/// section settings. Opaque to the editing operations.
pub type Fields = HashMap<String, String>;

/// Generates a fresh opaque identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// DOCUMENT ROOT
// =============================================================================

/// Root of a media kit document.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Sections in render order, top to bottom.
    pub sections: Vec<Section>,

    /// Map of component ID -> Component.
    pub components: HashMap<String, Component>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// An empty document is only a starting point; editing sessions always
    /// hold at least one section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document seeded with a single section.
    pub fn with_section(kind: SectionKind, layout: Layout) -> EditorResult<Self> {
        let mut doc = Self::new();
        doc.sections.push(Section::new(kind, layout)?);
        Ok(doc)
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Gets a section by ID.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub(crate) fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Position of a section in the document.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Gets a component by ID.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Total number of components in the store.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Components owned by a section, in column order then in-column order.
    pub fn components_in(&self, section_id: &str) -> EditorResult<Vec<&Component>> {
        let section = self
            .section(section_id)
            .ok_or_else(|| EditorError::section_not_found(section_id))?;
        Ok(section
            .component_ids()
            .filter_map(|id| self.components.get(id))
            .collect())
    }

    /// Finds where a component is placed.
    pub fn locate(&self, component_id: &str) -> Option<Placement> {
        self.sections.iter().find_map(|section| {
            section.columns.iter().find_map(|column| {
                column
                    .components
                    .iter()
                    .position(|id| id == component_id)
                    .map(|index| Placement {
                        section_id: section.id.clone(),
                        column_id: column.id.clone(),
                        index,
                    })
            })
        })
    }

    /// Returns true if some section has the given kind.
    pub fn has_kind(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }

    /// Builds a detached section for this document.
    ///
    /// Fails with `InvalidLayout` for an illegal kind/layout pair and with
    /// `SingleInstanceViolation` if `kind` is single-instance and already
    /// present. The section is not inserted.
    pub fn create_section(&self, kind: SectionKind, layout: Layout) -> EditorResult<Section> {
        let section = Section::new(kind, layout)?;
        if kind.is_single_instance() && self.has_kind(kind) {
            return Err(EditorError::single_instance(kind));
        }
        Ok(section)
    }

    /// Checks every structural invariant and reports the first violation.
    pub fn validate(&self) -> EditorResult<()> {
        let mut section_ids = HashSet::new();
        let mut referenced = HashSet::new();
        let mut singletons = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(EditorError::invariant(format!(
                    "duplicate section id {}",
                    section.id
                )));
            }
            section.kind.check_layout(section.layout)?;
            if section.kind.is_single_instance() && !singletons.insert(section.kind) {
                return Err(EditorError::single_instance(section.kind));
            }

            let names: Vec<&str> = section.columns.iter().map(|c| c.id.as_str()).collect();
            if names != section.layout.column_names() {
                return Err(EditorError::invariant(format!(
                    "section {} has columns {:?} but layout {} needs {:?}",
                    section.id,
                    names,
                    section.layout,
                    section.layout.column_names()
                )));
            }

            for id in section.component_ids() {
                if !self.components.contains_key(id) {
                    return Err(EditorError::invariant(format!(
                        "section {} references missing component {}",
                        section.id, id
                    )));
                }
                if !referenced.insert(id) {
                    return Err(EditorError::invariant(format!(
                        "component {id} is placed more than once"
                    )));
                }
            }
        }

        for (key, component) in &self.components {
            if key != &component.id {
                return Err(EditorError::invariant(format!(
                    "component stored under {} carries id {}",
                    key, component.id
                )));
            }
            if !referenced.contains(key.as_str()) {
                return Err(EditorError::invariant(format!("component {key} is orphaned")));
            }
        }

        Ok(())
    }
}

/// Where a component sits inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub section_id: String,
    pub column_id: String,
    pub index: usize,
}

// =============================================================================
// SECTION
// =============================================================================

/// A horizontal block of the page with a layout and its columns.
#[derive(Debug, Clone, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Unique identifier, fixed at creation.
    pub id: String,

    pub kind: SectionKind,

    pub layout: Layout,

    /// Columns in layout order.
    pub columns: Vec<Column>,

    /// Presentation attributes (background, padding, custom class).
    #[serde(default)]
    pub settings: Fields,
}

impl Section {
    /// Creates a detached section with fresh, empty columns.
    ///
    /// Fails with `InvalidLayout` if `layout` is not allowed for `kind`.
    pub fn new(kind: SectionKind, layout: Layout) -> EditorResult<Self> {
        kind.check_layout(layout)?;
        Ok(Self {
            id: new_id(),
            kind,
            layout,
            columns: layout.empty_columns(),
            settings: Fields::new(),
        })
    }

    /// Builder: Set a presentation setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Gets a column by ID.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub(crate) fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Component IDs in column order, then in-column order.
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .flat_map(|c| c.components.iter().map(String::as_str))
    }

    /// Returns true if the section places the component.
    pub fn contains(&self, component_id: &str) -> bool {
        self.component_ids().any(|id| id == component_id)
    }

    /// Switches layout and re-deals components round-robin across the new
    /// columns.
    ///
    /// Lossy: column membership is not preserved, only the overall order of
    /// components. Settings are kept as-is. Fails with `InvalidLayout` and
    /// leaves the section untouched if the layout is not allowed.
    pub fn change_layout(&mut self, layout: Layout) -> EditorResult<()> {
        self.kind.check_layout(layout)?;
        self.columns = redistribute(&self.columns, layout);
        self.layout = layout;
        Ok(())
    }
}

// =============================================================================
// COLUMN
// =============================================================================

/// An ordered slot within a section.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct Column {
    /// Column identifier from the layout topology ("main", "left", ...).
    pub id: String,

    /// Ordered component IDs.
    pub components: Vec<String>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            components: Vec::new(),
        }
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the column holds nothing.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// =============================================================================
// COMPONENT
// =============================================================================

/// A typed content block.
#[derive(Debug, Clone, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct Component {
    /// Unique identifier, fixed at creation.
    pub id: String,

    /// Type tag: "hero", "bio", "topics", ... Open-ended.
    #[serde(rename = "type")]
    pub component_type: String,

    /// Field values; shape depends on the type.
    #[serde(default)]
    pub content: Fields,

    /// Presentation overrides.
    #[serde(default)]
    pub styles: Fields,
}

impl Component {
    /// Creates a component with a fresh ID. Unknown types are accepted.
    pub fn new(component_type: impl Into<String>, content: Fields, styles: Fields) -> Self {
        Self {
            id: new_id(),
            component_type: component_type.into(),
            content,
            styles,
        }
    }

    /// Builder: Set a content field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    /// Builder: Set a style override.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    /// Gets a content field as a string slice.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.content.get(key).map(String::as_str)
    }

    /// Clone with a fresh ID.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
