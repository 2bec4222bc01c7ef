//! Mutation operations on a [`Document`].
//!
//! Every operation validates all of its references before touching the
//! document, so a failed call leaves the document exactly as it was. These
//! are the only sanctioned ways to change a document's structure.

use serde::{Deserialize, Serialize};

use super::layout::{Layout, SectionKind};
use super::model::{new_id, Component, Document, Fields};
use crate::error::{EditorError, EditorResult};

/// Direction for [`Document::move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Document {
    // =========================================================================
    // SECTIONS
    // =========================================================================

    /// Inserts a new empty section at the end, or right after `after`.
    pub fn add_section(
        &mut self,
        kind: SectionKind,
        layout: Layout,
        after: Option<&str>,
    ) -> EditorResult<String> {
        let index = match after {
            Some(id) => self.require_section_index(id)? + 1,
            None => self.sections.len(),
        };
        let section = self.create_section(kind, layout)?;
        let id = section.id.clone();
        self.sections.insert(index, section);
        Ok(id)
    }

    /// Removes a section and destroys every component it owns.
    ///
    /// A document always keeps at least one section.
    pub fn delete_section(&mut self, section_id: &str) -> EditorResult<()> {
        let index = self.require_section_index(section_id)?;
        if self.sections.len() == 1 {
            return Err(EditorError::LastSectionViolation);
        }
        let section = self.sections.remove(index);
        for id in section.component_ids() {
            self.components.remove(id);
        }
        Ok(())
    }

    /// Swaps a section with its neighbour.
    ///
    /// Returns false without changing anything when the section is already
    /// at the boundary in that direction.
    pub fn move_section(&mut self, section_id: &str, direction: Direction) -> EditorResult<bool> {
        let index = self.require_section_index(section_id)?;
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.sections.len() => index + 1,
            _ => return Ok(false),
        };
        self.sections.swap(index, target);
        Ok(true)
    }

    /// Deep-clones a section and its components with fresh IDs, placing the
    /// copy right after the original.
    pub fn duplicate_section(&mut self, section_id: &str) -> EditorResult<String> {
        let index = self.require_section_index(section_id)?;
        let original = &self.sections[index];
        if original.kind.is_single_instance() {
            return Err(EditorError::single_instance(original.kind));
        }

        let mut copy = original.clone();
        copy.id = new_id();
        let mut clones = Vec::new();
        for column in &mut copy.columns {
            for slot in &mut column.components {
                let component = self
                    .components
                    .get(slot.as_str())
                    .ok_or_else(|| EditorError::component_not_found(slot.as_str()))?
                    .duplicate();
                *slot = component.id.clone();
                clones.push(component);
            }
        }

        let id = copy.id.clone();
        self.components
            .extend(clones.into_iter().map(|c| (c.id.clone(), c)));
        self.sections.insert(index + 1, copy);
        Ok(id)
    }

    /// Changes a section's layout, re-dealing its components round-robin.
    ///
    /// Lossy: see [`super::model::Section::change_layout`].
    pub fn change_layout(&mut self, section_id: &str, layout: Layout) -> EditorResult<()> {
        self.section_mut(section_id)
            .ok_or_else(|| EditorError::section_not_found(section_id))?
            .change_layout(layout)
    }

    /// Merges values into a section's presentation settings.
    pub fn update_section_settings(&mut self, section_id: &str, settings: Fields) -> EditorResult<()> {
        self.section_mut(section_id)
            .ok_or_else(|| EditorError::section_not_found(section_id))?
            .settings
            .extend(settings);
        Ok(())
    }

    // =========================================================================
    // COMPONENTS
    // =========================================================================

    /// Creates a component and places it in a column.
    ///
    /// `position` defaults to the end of the column and is clamped to its
    /// length.
    pub fn add_component_to_column(
        &mut self,
        section_id: &str,
        column_id: &str,
        component_type: &str,
        content: Fields,
        styles: Fields,
        position: Option<usize>,
    ) -> EditorResult<String> {
        let component = Component::new(component_type, content, styles);
        self.insert_component(section_id, column_id, component, position)
    }

    /// Places an already built component in a column.
    ///
    /// Fails if the target does not exist or the component ID is already in
    /// use.
    pub fn insert_component(
        &mut self,
        section_id: &str,
        column_id: &str,
        component: Component,
        position: Option<usize>,
    ) -> EditorResult<String> {
        if self.components.contains_key(&component.id) {
            return Err(EditorError::invariant(format!(
                "component id {} is already in use",
                component.id
            )));
        }
        let column = self
            .section_mut(section_id)
            .ok_or_else(|| EditorError::section_not_found(section_id))?
            .column_mut(column_id)
            .ok_or_else(|| EditorError::column_not_found(section_id, column_id))?;

        let index = position.unwrap_or(column.len()).min(column.len());
        let id = component.id.clone();
        column.components.insert(index, id.clone());
        self.components.insert(id.clone(), component);
        Ok(id)
    }

    /// Removes a component from its column and from the store.
    pub fn remove_component(&mut self, component_id: &str) -> EditorResult<Component> {
        let placement = self
            .locate(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?;
        let component = self
            .components
            .remove(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?;
        if let Some(column) = self
            .section_mut(&placement.section_id)
            .and_then(|s| s.column_mut(&placement.column_id))
        {
            column.components.remove(placement.index);
        }
        Ok(component)
    }

    /// Moves a component to another column position in one step.
    ///
    /// The target position is read after the component has left its source
    /// column and is clamped to the target column's length. If the component
    /// or any part of the target is missing, nothing moves.
    pub fn move_component(
        &mut self,
        component_id: &str,
        target_section_id: &str,
        target_column_id: &str,
        target_position: Option<usize>,
    ) -> EditorResult<()> {
        let source = self
            .locate(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?;
        self.section(target_section_id)
            .ok_or_else(|| EditorError::section_not_found(target_section_id))?
            .column(target_column_id)
            .ok_or_else(|| EditorError::column_not_found(target_section_id, target_column_id))?;

        // Both ends are known to exist from here on.
        if let Some(column) = self
            .section_mut(&source.section_id)
            .and_then(|s| s.column_mut(&source.column_id))
        {
            column.components.remove(source.index);
        }
        if let Some(column) = self
            .section_mut(target_section_id)
            .and_then(|s| s.column_mut(target_column_id))
        {
            let index = target_position
                .unwrap_or(column.len())
                .min(column.len());
            column.components.insert(index, component_id.to_string());
        }
        Ok(())
    }

    /// Clones a component with a fresh ID right after the original.
    pub fn duplicate_component(&mut self, component_id: &str) -> EditorResult<String> {
        let placement = self
            .locate(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?;
        let copy = self
            .components
            .get(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?
            .duplicate();
        self.insert_component(
            &placement.section_id,
            &placement.column_id,
            copy,
            Some(placement.index + 1),
        )
    }

    /// Merges field values into a component's content.
    pub fn update_component_content(&mut self, component_id: &str, fields: Fields) -> EditorResult<()> {
        self.components
            .get_mut(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?
            .content
            .extend(fields);
        Ok(())
    }

    /// Merges style overrides into a component.
    pub fn update_component_styles(&mut self, component_id: &str, styles: Fields) -> EditorResult<()> {
        self.components
            .get_mut(component_id)
            .ok_or_else(|| EditorError::component_not_found(component_id))?
            .styles
            .extend(styles);
        Ok(())
    }

    fn require_section_index(&self, section_id: &str) -> EditorResult<usize> {
        self.section_index(section_id)
            .ok_or_else(|| EditorError::section_not_found(section_id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
