//! Expanding templates into live sections.

use std::collections::HashMap;

use super::catalog::{SectionTemplate, TemplateCatalog};
use crate::document::{Document, Fields};
use crate::error::{EditorError, EditorResult};

/// Content overrides keyed by component type, merged over a template's
/// default content.
pub type ContentOverrides = HashMap<String, Fields>;

impl SectionTemplate {
    /// Adds this template's section and components to `doc` using the
    /// ordinary mutation operations.
    ///
    /// Not atomic on its own: a failing component leaves the section and any
    /// earlier components in place. Use [`Document::insert_template`] for an
    /// all-or-nothing insert.
    pub fn apply_to(
        &self,
        doc: &mut Document,
        after: Option<&str>,
        overrides: &ContentOverrides,
    ) -> EditorResult<String> {
        let section_id = doc.add_section(self.kind, self.layout, after)?;
        let default_column = self.layout.column_names()[0];

        for spec in &self.components {
            let column = spec.column.as_deref().unwrap_or(default_column);
            let mut content = spec.content.clone();
            if let Some(fields) = overrides.get(&spec.component_type) {
                content.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            doc.add_component_to_column(
                &section_id,
                column,
                &spec.component_type,
                content,
                Fields::new(),
                None,
            )?;
        }

        Ok(section_id)
    }
}

impl Document {
    /// Inserts a template's section (at the end, or right after `after`).
    ///
    /// Fails with `TemplateNotFound`, `SingleInstanceViolation`, or any error
    /// from the underlying operations; on failure the document is unchanged.
    /// Access tiers are not checked here.
    pub fn insert_template(
        &mut self,
        catalog: &dyn TemplateCatalog,
        template_id: &str,
        after: Option<&str>,
    ) -> EditorResult<String> {
        self.insert_template_with_overrides(catalog, template_id, after, &ContentOverrides::new())
    }

    /// Like [`Document::insert_template`], merging `overrides` over the
    /// template's default content.
    pub fn insert_template_with_overrides(
        &mut self,
        catalog: &dyn TemplateCatalog,
        template_id: &str,
        after: Option<&str>,
        overrides: &ContentOverrides,
    ) -> EditorResult<String> {
        let template = catalog
            .get(template_id)
            .ok_or_else(|| EditorError::template_not_found(template_id))?;

        let mut scratch = self.clone();
        let section_id = template.apply_to(&mut scratch, after, overrides)?;
        *self = scratch;
        Ok(section_id)
    }
}
