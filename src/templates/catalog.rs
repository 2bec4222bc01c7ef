//! Static section template descriptors and catalogs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::{Fields, Layout, SectionKind};
use crate::error::EditorResult;

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// A named, static recipe for one section and its components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionTemplate {
    pub id: String,

    /// Display name for pickers.
    pub name: String,

    /// Grouping for pickers ("hero", "about", "media", ...).
    #[serde(default)]
    pub category: String,

    /// Marks templates reserved for paid tiers. Only access policies read it.
    #[serde(default)]
    pub premium: bool,

    pub kind: SectionKind,

    pub layout: Layout,

    pub components: Vec<TemplateComponent>,
}

impl SectionTemplate {
    /// Creates a template with no components.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SectionKind,
        layout: Layout,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            premium: false,
            kind,
            layout,
            components: Vec::new(),
        }
    }

    /// Builder: Set category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: Mark as premium.
    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }

    /// Builder: Add a component spec.
    pub fn with_component(mut self, component: TemplateComponent) -> Self {
        self.components.push(component);
        self
    }
}

/// One component inside a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateComponent {
    /// Target column name; `None` means the layout's first column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(rename = "type")]
    pub component_type: String,

    /// Default content.
    #[serde(default)]
    pub content: Fields,
}

impl TemplateComponent {
    /// Creates a component spec for the first column.
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            column: None,
            component_type: component_type.into(),
            content: Fields::new(),
        }
    }

    /// Builder: Target a named column.
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Builder: Set a default content field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// CATALOGS
// =============================================================================

/// Source of template descriptors keyed by ID.
pub trait TemplateCatalog {
    /// Looks up a template.
    fn get(&self, id: &str) -> Option<&SectionTemplate>;

    /// All templates, in catalog order.
    fn templates(&self) -> Vec<&SectionTemplate>;
}

/// An in-memory catalog, either built in or loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    order: Vec<String>,
    by_id: HashMap<String, SectionTemplate>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from templates. Later duplicates replace earlier ones.
    pub fn from_templates(templates: impl IntoIterator<Item = SectionTemplate>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog.insert(template);
        }
        catalog
    }

    /// Parses a JSON array of template descriptors.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let templates: Vec<SectionTemplate> = serde_json::from_str(json)?;
        Ok(Self::from_templates(templates))
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, template: SectionTemplate) {
        if !self.by_id.contains_key(&template.id) {
            self.order.push(template.id.clone());
        }
        self.by_id.insert(template.id.clone(), template);
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The templates that ship with the editor.
    pub fn builtin() -> Self {
        use Layout::*;
        use SectionKind::*;

        Self::from_templates([
            SectionTemplate::new("hero-centered", "Centered Hero", Hero, FullWidth)
                .with_category("hero")
                .with_component(
                    TemplateComponent::new("hero")
                        .with_field("name", "Your Name")
                        .with_field("title", "Speaker & Author")
                        .with_field("tagline", "Helping audiences think bigger"),
                ),
            SectionTemplate::new("hero-split", "Split Hero", Hero, TwoColumn)
                .with_category("hero")
                .premium()
                .with_component(
                    TemplateComponent::new("hero")
                        .in_column("left")
                        .with_field("name", "Your Name")
                        .with_field("title", "Keynote Speaker"),
                )
                .with_component(
                    TemplateComponent::new("image")
                        .in_column("right")
                        .with_field("url", "")
                        .with_field("alt", "Headshot"),
                ),
            SectionTemplate::new("bio-with-image", "Bio with Image", Content, TwoColumn)
                .with_category("about")
                .with_component(
                    TemplateComponent::new("bio")
                        .in_column("left")
                        .with_field("heading", "About Me")
                        .with_field("text", "Share your story, expertise and what drives you."),
                )
                .with_component(
                    TemplateComponent::new("image")
                        .in_column("right")
                        .with_field("url", "")
                        .with_field("alt", "Profile photo"),
                ),
            SectionTemplate::new("bio-full", "Full Bio", Content, FullWidth)
                .with_category("about")
                .with_component(
                    TemplateComponent::new("bio")
                        .with_field("heading", "Biography")
                        .with_field("text", "A longer biography for event organizers."),
                ),
            SectionTemplate::new("topics-grid", "Speaking Topics", Features, ThreeColumn)
                .with_category("topics")
                .with_component(TemplateComponent::new("topics").in_column("left").with_field("title", "Topic One"))
                .with_component(TemplateComponent::new("topics").in_column("center").with_field("title", "Topic Two"))
                .with_component(TemplateComponent::new("topics").in_column("right").with_field("title", "Topic Three")),
            SectionTemplate::new("stats-row", "Audience Stats", Features, FullWidth)
                .with_category("stats")
                .premium()
                .with_component(
                    TemplateComponent::new("stats")
                        .with_field("followers", "0")
                        .with_field("downloads", "0")
                        .with_field("events", "0"),
                ),
            SectionTemplate::new("media-gallery", "Media Gallery", Media, FullWidth)
                .with_category("media")
                .with_component(TemplateComponent::new("gallery").with_field("title", "Featured Appearances")),
            SectionTemplate::new("testimonials", "Testimonials", Content, TwoColumn)
                .with_category("social-proof")
                .premium()
                .with_component(
                    TemplateComponent::new("testimonials")
                        .in_column("left")
                        .with_field("quote", "An unforgettable keynote.")
                        .with_field("author", "Event Host"),
                )
                .with_component(
                    TemplateComponent::new("testimonials")
                        .in_column("right")
                        .with_field("quote", "Our audience loved every minute.")
                        .with_field("author", "Podcast Producer"),
                ),
            SectionTemplate::new("contact-simple", "Simple Contact", Contact, MainSidebar)
                .with_category("contact")
                .with_component(
                    TemplateComponent::new("contact")
                        .in_column("main")
                        .with_field("heading", "Book Me")
                        .with_field("email", ""),
                )
                .with_component(TemplateComponent::new("social").in_column("sidebar")),
            SectionTemplate::new("cta-banner", "Call to Action", Contact, FullWidth)
                .with_category("contact")
                .with_component(
                    TemplateComponent::new("cta")
                        .with_field("text", "Invite me to your next event")
                        .with_field("button", "Get in touch"),
                ),
        ])
    }
}

impl TemplateCatalog for StaticCatalog {
    fn get(&self, id: &str) -> Option<&SectionTemplate> {
        self.by_id.get(id)
    }

    fn templates(&self) -> Vec<&SectionTemplate> {
        self.order.iter().filter_map(|id| self.by_id.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_are_legal() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(catalog.len(), 10);
        for template in catalog.templates() {
            assert!(
                template.kind.allows(template.layout),
                "{} uses an illegal layout",
                template.id
            );
            for component in &template.components {
                if let Some(column) = &component.column {
                    assert!(
                        template.layout.column_names().contains(&column.as_str()),
                        "{} targets unknown column {}",
                        template.id,
                        column
                    );
                }
            }
        }
    }

    #[test]
    fn test_catalog_order_and_lookup() {
        let catalog = StaticCatalog::builtin();
        let ids: Vec<&str> = catalog.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids[0], "hero-centered");
        assert_eq!(ids[2], "bio-with-image");
        assert!(catalog.get("bio-with-image").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "id": "quote",
                "name": "Quote",
                "kind": "content",
                "layout": "full-width",
                "components": [
                    { "type": "testimonials", "content": { "quote": "Wow" } }
                ]
            }
        ]"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        let template = catalog.get("quote").unwrap();
        assert!(!template.premium);
        assert_eq!(template.layout, Layout::FullWidth);
        assert_eq!(template.components[0].column, None);
        assert_eq!(
            template.components[0].content.get("quote").map(String::as_str),
            Some("Wow")
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_layout() {
        let json = r#"[{ "id": "x", "name": "X", "kind": "content", "layout": "grid", "components": [] }]"#;
        assert!(StaticCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_insert_replaces_keeps_order() {
        let mut catalog = StaticCatalog::new();
        catalog.insert(SectionTemplate::new("a", "A", SectionKind::Content, Layout::FullWidth));
        catalog.insert(SectionTemplate::new("b", "B", SectionKind::Content, Layout::FullWidth));
        catalog.insert(SectionTemplate::new("a", "A2", SectionKind::Media, Layout::FullWidth));
        let names: Vec<&str> = catalog.templates().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }
}
