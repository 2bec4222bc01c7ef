//! Access policy seam.
//!
//! Whether an actor may use a template or component type is decided outside
//! the document core. Callers ask an [`AccessPolicy`] before invoking an
//! operation; a refusal is reported as `AccessDenied` and nothing is mutated.

use crate::templates::SectionTemplate;

/// Answers whether the current actor may use a template or component type.
pub trait AccessPolicy {
    fn can_use_template(&self, template: &SectionTemplate) -> bool;

    fn can_use_component(&self, component_type: &str) -> bool;
}

/// Permits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_use_template(&self, _template: &SectionTemplate) -> bool {
        true
    }

    fn can_use_component(&self, _component_type: &str) -> bool {
        true
    }
}

/// Refuses premium templates and a fixed list of premium component types.
#[derive(Debug, Clone, Default)]
pub struct DenyPremium {
    premium_components: Vec<String>,
}

impl DenyPremium {
    /// Creates a policy refusing only templates flagged premium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Also refuse a component type.
    pub fn with_premium_component(mut self, component_type: impl Into<String>) -> Self {
        self.premium_components.push(component_type.into());
        self
    }
}

impl AccessPolicy for DenyPremium {
    fn can_use_template(&self, template: &SectionTemplate) -> bool {
        !template.premium
            && template
                .components
                .iter()
                .all(|c| self.can_use_component(&c.component_type))
    }

    fn can_use_component(&self, component_type: &str) -> bool {
        !self.premium_components.iter().any(|c| c == component_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{StaticCatalog, TemplateCatalog};

    #[test]
    fn test_allow_all() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.templates().iter().all(|t| AllowAll.can_use_template(t)));
    }

    #[test]
    fn test_deny_premium() {
        let catalog = StaticCatalog::builtin();
        let policy = DenyPremium::new().with_premium_component("gallery");

        assert!(!policy.can_use_template(catalog.get("hero-split").unwrap()));
        assert!(policy.can_use_template(catalog.get("bio-with-image").unwrap()));
        assert!(!policy.can_use_template(catalog.get("media-gallery").unwrap()));
        assert!(!policy.can_use_component("gallery"));
        assert!(policy.can_use_component("bio"));
    }
}
