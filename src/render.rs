//! Read-only traversal for renderers.
//!
//! [`Document::walk`] visits sections top to bottom, each section's columns
//! in layout order, and each column's components in order. The editor emits
//! no rendering instructions of its own; [`OutlineRenderer`] is a plain-text
//! view used by the CLI and in tests.

use std::fmt::Write;

use crate::document::{Column, Component, Document, Section};
use crate::registry::ComponentRegistry;

/// Callbacks for [`Document::walk`]. All methods default to no-ops.
pub trait DocumentVisitor {
    fn enter_section(&mut self, _index: usize, _section: &Section) {}

    fn enter_column(&mut self, _section: &Section, _column: &Column) {}

    fn visit_component(&mut self, _column: &Column, _index: usize, _component: &Component) {}

    fn leave_column(&mut self, _section: &Section, _column: &Column) {}

    fn leave_section(&mut self, _index: usize, _section: &Section) {}
}

impl Document {
    /// Walks the document in render order.
    ///
    /// IDs referenced by a column but missing from the store are skipped.
    pub fn walk<V: DocumentVisitor + ?Sized>(&self, visitor: &mut V) {
        for (section_index, section) in self.sections.iter().enumerate() {
            visitor.enter_section(section_index, section);
            for column in &section.columns {
                visitor.enter_column(section, column);
                for (index, id) in column.components.iter().enumerate() {
                    if let Some(component) = self.components.get(id) {
                        visitor.visit_component(column, index, component);
                    }
                }
                visitor.leave_column(section, column);
            }
            visitor.leave_section(section_index, section);
        }
    }
}

/// Renders an indented text outline of a document.
pub struct OutlineRenderer<'a> {
    registry: &'a ComponentRegistry,
    show_ids: bool,
    out: String,
}

impl<'a> OutlineRenderer<'a> {
    /// Creates a renderer using `registry` for component summaries.
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            show_ids: false,
            out: String::new(),
        }
    }

    /// Builder: Include entity IDs in the outline.
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// Renders `doc` and returns the outline.
    pub fn render(mut self, doc: &Document) -> String {
        doc.walk(&mut self);
        self.out
    }
}

impl DocumentVisitor for OutlineRenderer<'_> {
    fn enter_section(&mut self, index: usize, section: &Section) {
        let _ = write!(self.out, "{}. {} [{}]", index + 1, section.kind, section.layout);
        if self.show_ids {
            let _ = write!(self.out, " ({})", section.id);
        }
        self.out.push('\n');
    }

    fn enter_column(&mut self, _section: &Section, column: &Column) {
        let _ = writeln!(self.out, "   {}:", column.id);
    }

    fn visit_component(&mut self, _column: &Column, _index: usize, component: &Component) {
        let _ = write!(self.out, "     - {}", self.registry.render_text(component));
        if self.show_ids {
            let _ = write!(self.out, " ({})", component.id);
        }
        self.out.push('\n');
    }
}
