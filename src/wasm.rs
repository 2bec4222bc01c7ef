//! WASM bindings for the editor session.
//!
//! This module provides a JavaScript-friendly wrapper around
//! [`EditorSession`] for use in browser builders. Documents cross the
//! boundary as plain JS objects; persistence uses Automerge bytes.

use js_sys::Uint8Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::document::{Direction, Fields, Layout, SectionKind};
use crate::error::EditorError;
use crate::registry::ComponentRegistry;
use crate::session::{EditorSession, Selection};
use crate::store::AutomergeStore;
use crate::templates::{StaticCatalog, TemplateCatalog};

/// Serialize a value to JsValue with HashMaps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<EditorError> for JsValue {
    fn from(err: EditorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: EditorError| JsValue::from(e))
    };
}

fn parse_fields(value: JsValue) -> Result<Fields, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Fields::new());
    }
    Ok(from_value(value)?)
}

/// Registered default content for a type, overlaid with caller content.
fn with_defaults(registry: &ComponentRegistry, component_type: &str, content: Fields) -> Fields {
    let mut fields = registry.default_content(component_type);
    fields.extend(content);
    fields
}

fn parse_direction(direction: &str) -> Result<Direction, JsValue> {
    match direction {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        other => Err(JsValue::from_str(&format!("Unknown direction: '{other}'"))),
    }
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around EditorSession.
///
/// Holds the built-in template catalog and component registry alongside the
/// session so the browser does not need to pass them on every call.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
    catalog: StaticCatalog,
    registry: ComponentRegistry,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Creates a session over a blank document.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const session = new JsEditorSession();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsEditorSession, JsValue> {
        let inner = js_result!(EditorSession::blank(EditorConfig::default()))?;
        Ok(Self::wrap(inner))
    }

    /// Loads a session from Automerge bytes (Uint8Array).
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const session = JsEditorSession.fromBytes(savedBytes);
    /// ```
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: &[u8]) -> Result<JsEditorSession, JsValue> {
        let mut store = js_result!(AutomergeStore::from_bytes(bytes))?;
        let inner = js_result!(EditorSession::load_from(&mut store, EditorConfig::default()))?;
        Ok(Self::wrap(inner))
    }

    /// Saves the current document to Automerge bytes.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const bytes = session.toBytes();
    /// // POST bytes to the autosave endpoint
    /// ```
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Result<Uint8Array, JsValue> {
        let mut store = AutomergeStore::new();
        js_result!(self.inner.save_to(&mut store))?;
        let bytes = store.save();
        Ok(Uint8Array::from(&bytes[..]))
    }

    /// Gets the full document as a JavaScript object with `sections` and
    /// `components`.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const doc = session.getDocument();
    /// console.log(doc.sections[0].layout); // "full-width"
    /// ```
    #[wasm_bindgen(js_name = getDocument)]
    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(self.inner.document())?)
    }

    /// Lists the built-in templates.
    #[wasm_bindgen(js_name = getTemplates)]
    pub fn get_templates(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.catalog.templates())?)
    }

    fn wrap(inner: EditorSession) -> JsEditorSession {
        JsEditorSession {
            inner,
            catalog: StaticCatalog::builtin(),
            registry: ComponentRegistry::with_builtin_types(),
        }
    }
}

// =============================================================================
// SECTION METHODS
// =============================================================================

#[wasm_bindgen]
impl JsEditorSession {
    /// Adds a section and returns its ID.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const id = session.addSection('content', 'two-column', null);
    /// ```
    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(&mut self, kind: &str, layout: &str, after: Option<String>) -> Result<String, JsValue> {
        let kind: SectionKind = js_result!(kind.parse())?;
        let layout: Layout = js_result!(layout.parse())?;
        Ok(js_result!(self.inner.add_section(kind, layout, after.as_deref()))?)
    }

    /// Deletes a section and its components.
    #[wasm_bindgen(js_name = deleteSection)]
    pub fn delete_section(&mut self, section_id: &str) -> Result<(), JsValue> {
        js_result!(self.inner.delete_section(section_id))?;
        Ok(())
    }

    /// Moves a section "up" or "down". Returns false at the boundary.
    #[wasm_bindgen(js_name = moveSection)]
    pub fn move_section(&mut self, section_id: &str, direction: &str) -> Result<bool, JsValue> {
        let direction = parse_direction(direction)?;
        Ok(js_result!(self.inner.move_section(section_id, direction))?)
    }

    /// Duplicates a section and returns the copy's ID.
    #[wasm_bindgen(js_name = duplicateSection)]
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, JsValue> {
        Ok(js_result!(self.inner.duplicate_section(section_id))?)
    }

    /// Changes a section's layout (components are re-dealt round-robin).
    #[wasm_bindgen(js_name = changeLayout)]
    pub fn change_layout(&mut self, section_id: &str, layout: &str) -> Result<(), JsValue> {
        let layout: Layout = js_result!(layout.parse())?;
        js_result!(self.inner.change_layout(section_id, layout))?;
        Ok(())
    }

    /// Merges presentation settings into a section.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// session.updateSectionSettings(sectionId, { background: '#fafafa' });
    /// ```
    #[wasm_bindgen(js_name = updateSectionSettings)]
    pub fn update_section_settings(&mut self, section_id: &str, settings: JsValue) -> Result<(), JsValue> {
        let settings = parse_fields(settings)?;
        js_result!(self.inner.update_section_settings(section_id, settings))?;
        Ok(())
    }

    /// Inserts a built-in template and returns the new section's ID.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// session.insertTemplate('bio-with-image', null);
    /// ```
    #[wasm_bindgen(js_name = insertTemplate)]
    pub fn insert_template(&mut self, template_id: &str, after: Option<String>) -> Result<String, JsValue> {
        Ok(js_result!(self.inner.insert_template(&self.catalog, template_id, after.as_deref()))?)
    }
}

// =============================================================================
// COMPONENT METHODS
// =============================================================================

#[wasm_bindgen]
impl JsEditorSession {
    /// Adds a component with its registered default content merged with
    /// `content`. `styles` may be null.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const id = session.addComponent(sectionId, 'left', 'bio', { text: 'Hi' }, { color: '#333' }, null);
    /// ```
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(
        &mut self,
        section_id: &str,
        column_id: &str,
        component_type: &str,
        content: JsValue,
        styles: JsValue,
        position: Option<usize>,
    ) -> Result<String, JsValue> {
        let content = with_defaults(&self.registry, component_type, parse_fields(content)?);
        let styles = parse_fields(styles)?;
        Ok(js_result!(self.inner.add_component_to_column(
            section_id,
            column_id,
            component_type,
            content,
            styles,
            position
        ))?)
    }

    /// Removes a component.
    #[wasm_bindgen(js_name = removeComponent)]
    pub fn remove_component(&mut self, component_id: &str) -> Result<(), JsValue> {
        js_result!(self.inner.remove_component(component_id))?;
        Ok(())
    }

    /// Moves a component to a column position.
    #[wasm_bindgen(js_name = moveComponent)]
    pub fn move_component(
        &mut self,
        component_id: &str,
        section_id: &str,
        column_id: &str,
        position: Option<usize>,
    ) -> Result<(), JsValue> {
        js_result!(self.inner.move_component(component_id, section_id, column_id, position))?;
        Ok(())
    }

    /// Duplicates a component and returns the copy's ID.
    #[wasm_bindgen(js_name = duplicateComponent)]
    pub fn duplicate_component(&mut self, component_id: &str) -> Result<String, JsValue> {
        Ok(js_result!(self.inner.duplicate_component(component_id))?)
    }

    /// Merges field values into a component's content.
    #[wasm_bindgen(js_name = updateContent)]
    pub fn update_content(&mut self, component_id: &str, content: JsValue) -> Result<(), JsValue> {
        let fields = parse_fields(content)?;
        js_result!(self.inner.update_component_content(component_id, fields))?;
        Ok(())
    }

    /// Merges style overrides into a component.
    #[wasm_bindgen(js_name = updateStyles)]
    pub fn update_styles(&mut self, component_id: &str, styles: JsValue) -> Result<(), JsValue> {
        let styles = parse_fields(styles)?;
        js_result!(self.inner.update_component_styles(component_id, styles))?;
        Ok(())
    }

    /// Fills components from a profile object; returns how many changed.
    #[wasm_bindgen(js_name = populate)]
    pub fn populate(&mut self, profile: JsValue) -> Result<usize, JsValue> {
        let data = parse_fields(profile)?;
        Ok(js_result!(self.inner.populate_from(&data, &self.registry))?)
    }
}

// =============================================================================
// HISTORY AND SELECTION
// =============================================================================

#[wasm_bindgen]
impl JsEditorSession {
    /// Steps back one edit.
    pub fn undo(&mut self) -> Result<(), JsValue> {
        js_result!(self.inner.undo())
    }

    /// Re-applies the last undone edit.
    pub fn redo(&mut self) -> Result<(), JsValue> {
        js_result!(self.inner.redo())
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Selects a section or component by ID; pass null to clear.
    pub fn select(&mut self, id: Option<String>) -> Result<(), JsValue> {
        match id {
            None => {
                self.inner.clear_selection();
                Ok(())
            }
            Some(id) if self.inner.document().section(&id).is_some() => {
                js_result!(self.inner.select_section(&id))
            }
            Some(id) => js_result!(self.inner.select_component(&id)),
        }
    }

    /// The selected entity's ID, or null.
    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Option<String> {
        match self.inner.selection() {
            Selection::None => None,
            Selection::Section(id) | Selection::Component(id) => Some(id.clone()),
        }
    }
}
