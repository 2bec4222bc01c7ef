//! # Editor Session
//!
//! An [`EditorSession`] owns one live [`Document`], its undo/redo history and
//! the current selection. Every editing call goes through the session, which
//! snapshots the document, runs the operation, and commits exactly one
//! history entry if the operation succeeded. Failed operations never commit
//! and never leave a partial change behind.

use tracing::{debug, warn};

use crate::access::AccessPolicy;
use crate::config::EditorConfig;
use crate::document::{Direction, Document, Fields, Layout, SectionKind};
use crate::error::{EditorError, EditorResult};
use crate::history::HistoryManager;
use crate::registry::ComponentRegistry;
use crate::store::SnapshotStore;
use crate::templates::{ContentOverrides, TemplateCatalog};

/// What the user currently has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Section(String),
    Component(String),
}

/// Single-user editing session over one document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: Document,
    history: HistoryManager,
    selection: Selection,
    config: EditorConfig,
}

impl EditorSession {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates a session with the default configuration.
    pub fn new(document: Document) -> Self {
        Self::with_config(document, EditorConfig::default())
    }

    /// Creates a session with an explicit configuration.
    pub fn with_config(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            history: HistoryManager::with_limit(config.history_limit),
            selection: Selection::None,
            config,
        }
    }

    /// Creates a session over a document holding one full-width content
    /// section.
    pub fn blank(config: EditorConfig) -> EditorResult<Self> {
        let document = Document::with_section(SectionKind::Content, Layout::FullWidth)?;
        Ok(Self::with_config(document, config))
    }

    /// Creates a session from a stored snapshot.
    ///
    /// With `validate_on_load` set, documents that break an invariant or hold
    /// no sections are rejected.
    pub fn load_from(store: &mut dyn SnapshotStore, config: EditorConfig) -> EditorResult<Self> {
        let document = store.load()?;
        if config.validate_on_load {
            let checked = document.validate().and_then(|()| {
                if document.is_empty() {
                    Err(EditorError::invariant("document has no sections"))
                } else {
                    Ok(())
                }
            });
            if let Err(err) = checked {
                warn!(error = %err, "rejected stored document");
                return Err(err);
            }
        }
        debug!(
            sections = document.len(),
            components = document.component_count(),
            "loaded document"
        );
        Ok(Self::with_config(document, config))
    }

    /// Hands the current document to a store.
    pub fn save_to(&self, store: &mut dyn SnapshotStore) -> EditorResult<()> {
        store.store(&self.document)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the session, returning the live document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// The undo/redo history.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Selects a section.
    pub fn select_section(&mut self, section_id: &str) -> EditorResult<()> {
        if self.document.section(section_id).is_none() {
            return Err(EditorError::section_not_found(section_id));
        }
        self.selection = Selection::Section(section_id.to_string());
        Ok(())
    }

    /// Selects a component.
    pub fn select_component(&mut self, component_id: &str) -> EditorResult<()> {
        if self.document.component(component_id).is_none() {
            return Err(EditorError::component_not_found(component_id));
        }
        self.selection = Selection::Component(component_id.to_string());
        Ok(())
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Drops the selection if it no longer names a live entity.
    fn prune_selection(&mut self) {
        let live = match &self.selection {
            Selection::None => true,
            Selection::Section(id) => self.document.section(id).is_some(),
            Selection::Component(id) => self.document.component(id).is_some(),
        };
        if !live {
            self.selection = Selection::None;
        }
    }

    // =========================================================================
    // HISTORY
    // =========================================================================

    /// Restores the state before the most recent committed edit.
    pub fn undo(&mut self) -> EditorResult<()> {
        if !self.history.can_undo() {
            return Err(EditorError::NothingToUndo);
        }
        let current = std::mem::take(&mut self.document);
        self.document = self.history.undo(current)?;
        self.prune_selection();
        debug!(undo_levels = self.history.undo_levels(), "undo");
        Ok(())
    }

    /// Re-applies the most recently undone edit.
    pub fn redo(&mut self) -> EditorResult<()> {
        if !self.history.can_redo() {
            return Err(EditorError::NothingToRedo);
        }
        let current = std::mem::take(&mut self.document);
        self.document = self.history.redo(current)?;
        self.prune_selection();
        debug!(redo_levels = self.history.redo_levels(), "redo");
        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // SECTION OPERATIONS
    // =========================================================================

    /// See [`Document::add_section`].
    pub fn add_section(
        &mut self,
        kind: SectionKind,
        layout: Layout,
        after: Option<&str>,
    ) -> EditorResult<String> {
        self.apply("add_section", |doc| doc.add_section(kind, layout, after))
    }

    /// See [`Document::delete_section`].
    pub fn delete_section(&mut self, section_id: &str) -> EditorResult<()> {
        self.apply("delete_section", |doc| doc.delete_section(section_id))
    }

    /// See [`Document::move_section`]. A move at the boundary commits
    /// nothing.
    pub fn move_section(&mut self, section_id: &str, direction: Direction) -> EditorResult<bool> {
        self.transact("move_section", |doc| {
            let moved = doc.move_section(section_id, direction)?;
            Ok((moved, moved))
        })
    }

    /// See [`Document::duplicate_section`].
    pub fn duplicate_section(&mut self, section_id: &str) -> EditorResult<String> {
        self.apply("duplicate_section", |doc| doc.duplicate_section(section_id))
    }

    /// See [`Document::change_layout`]. Lossy: components are re-dealt
    /// round-robin across the new columns.
    pub fn change_layout(&mut self, section_id: &str, layout: Layout) -> EditorResult<()> {
        self.apply("change_layout", |doc| doc.change_layout(section_id, layout))
    }

    /// See [`Document::update_section_settings`].
    pub fn update_section_settings(&mut self, section_id: &str, settings: Fields) -> EditorResult<()> {
        self.apply("update_section_settings", |doc| {
            doc.update_section_settings(section_id, settings)
        })
    }

    // =========================================================================
    // COMPONENT OPERATIONS
    // =========================================================================

    /// See [`Document::add_component_to_column`].
    pub fn add_component_to_column(
        &mut self,
        section_id: &str,
        column_id: &str,
        component_type: &str,
        content: Fields,
        styles: Fields,
        position: Option<usize>,
    ) -> EditorResult<String> {
        self.apply("add_component", |doc| {
            doc.add_component_to_column(section_id, column_id, component_type, content, styles, position)
        })
    }

    /// Adds a component seeded with its registered default content.
    pub fn add_default_component(
        &mut self,
        registry: &ComponentRegistry,
        section_id: &str,
        column_id: &str,
        component_type: &str,
        position: Option<usize>,
    ) -> EditorResult<String> {
        let content = registry.default_content(component_type);
        self.add_component_to_column(section_id, column_id, component_type, content, Fields::new(), position)
    }

    /// Adds a component after asking `policy` whether its type may be used.
    pub fn add_component_checked(
        &mut self,
        policy: &dyn AccessPolicy,
        registry: &ComponentRegistry,
        section_id: &str,
        column_id: &str,
        component_type: &str,
        position: Option<usize>,
    ) -> EditorResult<String> {
        if !policy.can_use_component(component_type) {
            warn!(component_type, "component type refused by access policy");
            return Err(EditorError::access_denied(format!("component type '{component_type}'")));
        }
        self.add_default_component(registry, section_id, column_id, component_type, position)
    }

    /// See [`Document::remove_component`].
    pub fn remove_component(&mut self, component_id: &str) -> EditorResult<()> {
        self.apply("remove_component", |doc| doc.remove_component(component_id).map(|_| ()))
    }

    /// See [`Document::move_component`].
    pub fn move_component(
        &mut self,
        component_id: &str,
        target_section_id: &str,
        target_column_id: &str,
        target_position: Option<usize>,
    ) -> EditorResult<()> {
        self.apply("move_component", |doc| {
            doc.move_component(component_id, target_section_id, target_column_id, target_position)
        })
    }

    /// See [`Document::duplicate_component`].
    pub fn duplicate_component(&mut self, component_id: &str) -> EditorResult<String> {
        self.apply("duplicate_component", |doc| doc.duplicate_component(component_id))
    }

    /// See [`Document::update_component_content`].
    pub fn update_component_content(&mut self, component_id: &str, fields: Fields) -> EditorResult<()> {
        self.apply("update_component_content", |doc| {
            doc.update_component_content(component_id, fields)
        })
    }

    /// See [`Document::update_component_styles`].
    pub fn update_component_styles(&mut self, component_id: &str, styles: Fields) -> EditorResult<()> {
        self.apply("update_component_styles", |doc| {
            doc.update_component_styles(component_id, styles)
        })
    }

    /// Fills every component's content from a profile data map using the
    /// registry's field conventions. Returns how many components changed;
    /// commits only if that is non-zero.
    pub fn populate_from(&mut self, data: &Fields, registry: &ComponentRegistry) -> EditorResult<usize> {
        self.transact("populate", |doc| {
            let changed = doc
                .components
                .values_mut()
                .filter_map(|component| registry.populate(component, data).then_some(()))
                .count();
            Ok((changed, changed > 0))
        })
    }

    // =========================================================================
    // TEMPLATES
    // =========================================================================

    /// See [`Document::insert_template`].
    pub fn insert_template(
        &mut self,
        catalog: &dyn TemplateCatalog,
        template_id: &str,
        after: Option<&str>,
    ) -> EditorResult<String> {
        self.apply("insert_template", |doc| doc.insert_template(catalog, template_id, after))
    }

    /// See [`Document::insert_template_with_overrides`].
    pub fn insert_template_with_overrides(
        &mut self,
        catalog: &dyn TemplateCatalog,
        template_id: &str,
        after: Option<&str>,
        overrides: &ContentOverrides,
    ) -> EditorResult<String> {
        self.apply("insert_template", |doc| {
            doc.insert_template_with_overrides(catalog, template_id, after, overrides)
        })
    }

    /// Inserts a template after asking `policy` whether it may be used.
    ///
    /// A refusal fails with `AccessDenied` before the document is touched.
    pub fn insert_template_checked(
        &mut self,
        policy: &dyn AccessPolicy,
        catalog: &dyn TemplateCatalog,
        template_id: &str,
        after: Option<&str>,
    ) -> EditorResult<String> {
        let template = catalog
            .get(template_id)
            .ok_or_else(|| EditorError::template_not_found(template_id))?;
        if !policy.can_use_template(template) {
            warn!(template_id, "template refused by access policy");
            return Err(EditorError::access_denied(format!("template '{template_id}'")));
        }
        self.insert_template(catalog, template_id, after)
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    /// Runs an operation that always changes the document on success.
    fn apply<T, F>(&mut self, op: &'static str, f: F) -> EditorResult<T>
    where
        F: FnOnce(&mut Document) -> EditorResult<T>,
    {
        self.transact(op, |doc| f(doc).map(|value| (value, true)))
    }

    /// Runs an operation against the live document. On success with
    /// `changed`, the pre-operation snapshot is committed; on failure the
    /// snapshot is put back.
    fn transact<T, F>(&mut self, op: &'static str, f: F) -> EditorResult<T>
    where
        F: FnOnce(&mut Document) -> EditorResult<(T, bool)>,
    {
        let before = self.document.clone();
        match f(&mut self.document) {
            Ok((value, changed)) => {
                if changed {
                    self.history.commit(before);
                    self.prune_selection();
                    debug!(
                        op,
                        sections = self.document.len(),
                        components = self.document.component_count(),
                        undo_levels = self.history.undo_levels(),
                        "committed"
                    );
                }
                Ok(value)
            }
            Err(err) => {
                self.document = before;
                debug!(op, error = %err, "rejected");
                Err(err)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
