//! Component type registry.
//!
//! Maps a component type tag to the behavior the editor needs from it:
//! default content, population from profile data, and a plain-text
//! rendering. New types are added by registering a [`ComponentType`]; the
//! document core never needs to change. Unregistered types are tolerated
//! everywhere and simply have no behavior.

use std::collections::HashMap;

use crate::document::{Component, Fields};

/// Behavior for one component type.
pub trait ComponentType: Send + Sync {
    /// The type tag this behavior is registered under.
    fn type_name(&self) -> &str;

    /// Human readable name for palettes.
    fn label(&self) -> &str;

    /// Content for a freshly added component.
    fn default_content(&self) -> Fields;

    /// Copies the fields this type knows about from `data` into `content`.
    /// Returns true if anything changed.
    fn populate(&self, content: &mut Fields, data: &Fields) -> bool;

    /// One-line plain text summary of the content.
    fn render_text(&self, content: &Fields) -> String;
}

/// A component type described by its field list.
///
/// Each field maps a content key to the profile data key it is populated
/// from. The first field is the headline used for text rendering.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    type_name: String,
    label: String,
    fields: Vec<(String, String)>,
}

impl FieldSchema {
    /// Creates a schema with no fields.
    pub fn new(type_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Builder: Add a field populated from the profile key of the same name.
    pub fn field(self, key: &str) -> Self {
        self.field_from(key, key)
    }

    /// Builder: Add a field populated from a differently named profile key.
    pub fn field_from(mut self, key: &str, source: &str) -> Self {
        self.fields.push((key.to_string(), source.to_string()));
        self
    }
}

impl ComponentType for FieldSchema {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn default_content(&self) -> Fields {
        self.fields
            .iter()
            .map(|(key, _)| (key.clone(), String::new()))
            .collect()
    }

    fn populate(&self, content: &mut Fields, data: &Fields) -> bool {
        let mut changed = false;
        for (key, source) in &self.fields {
            if let Some(value) = data.get(source) {
                if content.get(key) != Some(value) {
                    content.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
        }
        changed
    }

    fn render_text(&self, content: &Fields) -> String {
        let headline = self
            .fields
            .iter()
            .find_map(|(key, _)| content.get(key).filter(|v| !v.is_empty()));
        match headline {
            Some(text) => format!("{}: {}", self.label, text),
            None => self.label.clone(),
        }
    }
}

/// Type tag -> behavior table.
#[derive(Default)]
pub struct ComponentRegistry {
    types: HashMap<String, Box<dyn ComponentType>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the media kit component types.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        let builtins = [
            FieldSchema::new("hero", "Hero")
                .field("name")
                .field_from("title", "headline")
                .field("tagline")
                .field_from("image", "headshot"),
            FieldSchema::new("bio", "Biography")
                .field_from("text", "biography")
                .field("heading"),
            FieldSchema::new("topics", "Topics")
                .field_from("title", "topic")
                .field_from("description", "topic_description"),
            FieldSchema::new("social", "Social Links")
                .field("twitter")
                .field("linkedin")
                .field("instagram")
                .field("youtube"),
            FieldSchema::new("stats", "Stats")
                .field("followers")
                .field("downloads")
                .field("events"),
            FieldSchema::new("contact", "Contact")
                .field("email")
                .field("phone")
                .field("website")
                .field("heading"),
            FieldSchema::new("cta", "Call to Action")
                .field("text")
                .field("button")
                .field_from("link", "booking_url"),
            FieldSchema::new("gallery", "Gallery").field("title"),
            FieldSchema::new("testimonials", "Testimonials")
                .field("quote")
                .field("author"),
            FieldSchema::new("image", "Image")
                .field_from("url", "headshot")
                .field("alt"),
        ];
        for schema in builtins {
            registry.register(schema);
        }
        registry
    }

    /// Registers (or replaces) the behavior for a type.
    pub fn register(&mut self, component_type: impl ComponentType + 'static) {
        self.types.insert(
            component_type.type_name().to_string(),
            Box::new(component_type),
        );
    }

    /// Looks up the behavior for a type.
    pub fn get(&self, type_name: &str) -> Option<&dyn ComponentType> {
        self.types.get(type_name).map(|t| t.as_ref())
    }

    /// Returns true if the type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type tags, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Default content for a type; empty for unknown types.
    pub fn default_content(&self, type_name: &str) -> Fields {
        self.get(type_name)
            .map(|t| t.default_content())
            .unwrap_or_default()
    }

    /// Populates a component from profile data. Unknown types are left
    /// untouched.
    pub fn populate(&self, component: &mut Component, data: &Fields) -> bool {
        match self.get(&component.component_type) {
            Some(t) => t.populate(&mut component.content, data),
            None => false,
        }
    }

    /// Plain text for a component; unknown types render as their tag.
    pub fn render_text(&self, component: &Component) -> String {
        match self.get(&component.component_type) {
            Some(t) => t.render_text(&component.content),
            None => component.component_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builtin_types() {
        let registry = ComponentRegistry::with_builtin_types();
        for name in ["hero", "bio", "topics", "social", "stats", "contact", "cta", "gallery", "testimonials", "image"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.type_names().len(), 10);
    }

    #[test]
    fn test_populate_by_convention() {
        let registry = ComponentRegistry::with_builtin_types();
        let mut hero = Component::new("hero", Fields::new(), Fields::new());
        let profile = data(&[("name", "Ada Lovelace"), ("headline", "Mathematician"), ("unused", "x")]);

        assert!(registry.populate(&mut hero, &profile));
        assert_eq!(hero.field("name"), Some("Ada Lovelace"));
        assert_eq!(hero.field("title"), Some("Mathematician"));
        assert!(hero.field("unused").is_none());

        // Same data again changes nothing.
        assert!(!registry.populate(&mut hero, &profile));
    }

    #[test]
    fn test_unknown_type_is_noop() {
        let registry = ComponentRegistry::with_builtin_types();
        let mut widget = Component::new("podcast-player", Fields::new(), Fields::new());
        assert!(!registry.populate(&mut widget, &data(&[("name", "x")])));
        assert!(widget.content.is_empty());
        assert_eq!(registry.render_text(&widget), "podcast-player");
        assert!(registry.default_content("podcast-player").is_empty());
    }

    #[test]
    fn test_render_text_headline() {
        let registry = ComponentRegistry::with_builtin_types();
        let bio = Component::new("bio", Fields::new(), Fields::new()).with_field("text", "Hello there");
        assert_eq!(registry.render_text(&bio), "Biography: Hello there");
        let empty = Component::new("bio", registry.default_content("bio"), Fields::new());
        assert_eq!(registry.render_text(&empty), "Biography");
    }

    #[test]
    fn test_register_custom_type() {
        let mut registry = ComponentRegistry::new();
        registry.register(FieldSchema::new("podcast", "Podcast").field("feed_url"));
        assert_eq!(
            registry.default_content("podcast").get("feed_url").map(String::as_str),
            Some("")
        );
        assert_eq!(registry.get("podcast").unwrap().label(), "Podcast");
    }
}
