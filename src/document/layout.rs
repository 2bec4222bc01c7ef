//! Section kinds, layouts and the column topology engine.
//!
//! A layout fixes how many columns a section has and what they are called.
//! Changing a section's layout re-deals its components across the new
//! columns round-robin; see [`redistribute`].

use std::fmt;
use std::str::FromStr;

use autosurgeon::reconcile::NoKey;
use autosurgeon::{Hydrate, HydrateError, Reconcile, Reconciler};
use serde::{Deserialize, Serialize};

use super::model::Column;
use crate::error::{EditorError, EditorResult};

// =============================================================================
// SECTION KIND
// =============================================================================

/// The role a section plays on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Hero,
    Content,
    Features,
    Media,
    Contact,
}

impl SectionKind {
    /// Every section kind, in palette order.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Hero,
        SectionKind::Content,
        SectionKind::Features,
        SectionKind::Media,
        SectionKind::Contact,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Content => "content",
            SectionKind::Features => "features",
            SectionKind::Media => "media",
            SectionKind::Contact => "contact",
        }
    }

    /// Layouts a section of this kind may use.
    pub fn allowed_layouts(&self) -> &'static [Layout] {
        use Layout::*;
        match self {
            SectionKind::Hero => &[FullWidth, TwoColumn],
            SectionKind::Content => &[FullWidth, TwoColumn, ThreeColumn, MainSidebar],
            SectionKind::Features => &[FullWidth, TwoColumn, ThreeColumn],
            SectionKind::Media => &[FullWidth, TwoColumn, ThreeColumn],
            SectionKind::Contact => &[FullWidth, TwoColumn, MainSidebar],
        }
    }

    /// Returns true if `layout` is legal for this kind.
    pub fn allows(&self, layout: Layout) -> bool {
        self.allowed_layouts().contains(&layout)
    }

    /// Kinds limited to one section per document.
    pub fn is_single_instance(&self) -> bool {
        matches!(self, SectionKind::Hero)
    }

    /// Fails with `InvalidLayout` unless `layout` is allowed for this kind.
    pub fn check_layout(&self, layout: Layout) -> EditorResult<()> {
        if self.allows(layout) {
            Ok(())
        } else {
            Err(EditorError::invalid_layout(self, layout))
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditorError::unknown_variant("section kind", s))
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Column topology of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    FullWidth,
    TwoColumn,
    ThreeColumn,
    MainSidebar,
}

impl Layout {
    /// Every layout, in palette order.
    pub const ALL: [Layout; 4] = [
        Layout::FullWidth,
        Layout::TwoColumn,
        Layout::ThreeColumn,
        Layout::MainSidebar,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::FullWidth => "full-width",
            Layout::TwoColumn => "two-column",
            Layout::ThreeColumn => "three-column",
            Layout::MainSidebar => "main-sidebar",
        }
    }

    /// Ordered column identifiers for this layout.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            Layout::FullWidth => &["main"],
            Layout::TwoColumn => &["left", "right"],
            Layout::ThreeColumn => &["left", "center", "right"],
            Layout::MainSidebar => &["main", "sidebar"],
        }
    }

    /// Relative column widths, a presentation hint for renderers.
    pub fn ratios(&self) -> &'static [u8] {
        match self {
            Layout::FullWidth => &[1],
            Layout::TwoColumn => &[1, 1],
            Layout::ThreeColumn => &[1, 1, 1],
            Layout::MainSidebar => &[2, 1],
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_names().len()
    }

    /// Empty columns for this layout.
    pub fn empty_columns(&self) -> Vec<Column> {
        self.column_names().iter().map(|name| Column::new(*name)).collect()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| EditorError::unknown_variant("layout", s))
    }
}

// =============================================================================
// REDISTRIBUTION
// =============================================================================

/// Flattens `columns` in column order, then deals the component IDs
/// round-robin into fresh columns for `layout`.
///
/// This is lossy: which column a component sat in is not preserved, only the
/// relative order of all components. The total count never changes.
pub fn redistribute(columns: &[Column], layout: Layout) -> Vec<Column> {
    let mut next = layout.empty_columns();
    let width = next.len();
    let flattened = columns.iter().flat_map(|c| c.components.iter().cloned());
    for (i, id) in flattened.enumerate() {
        next[i % width].components.push(id);
    }
    next
}

// =============================================================================
// AUTOMERGE MAPPING
// =============================================================================

// Both enums are stored as their kebab-case string.

impl Reconcile for SectionKind {
    type Key<'a> = NoKey;

    fn reconcile<R: Reconciler>(&self, mut reconciler: R) -> Result<(), R::Error> {
        reconciler.str(self.as_str())
    }
}

impl Hydrate for SectionKind {
    fn hydrate_string(s: &'_ str) -> Result<Self, HydrateError> {
        s.parse()
            .map_err(|_| HydrateError::unexpected("a section kind", s.to_string()))
    }
}

impl Reconcile for Layout {
    type Key<'a> = NoKey;

    fn reconcile<R: Reconciler>(&self, mut reconciler: R) -> Result<(), R::Error> {
        reconciler.str(self.as_str())
    }
}

impl Hydrate for Layout {
    fn hydrate_string(s: &'_ str) -> Result<Self, HydrateError> {
        s.parse()
            .map_err(|_| HydrateError::unexpected("a layout", s.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, ids: &[&str]) -> Column {
        let mut c = Column::new(name);
        c.components = ids.iter().map(|s| s.to_string()).collect();
        c
    }

    #[test]
    fn test_column_topology() {
        assert_eq!(Layout::FullWidth.column_names(), &["main"]);
        assert_eq!(Layout::TwoColumn.column_count(), 2);
        assert_eq!(Layout::ThreeColumn.column_count(), 3);
        assert_eq!(Layout::MainSidebar.column_names(), &["main", "sidebar"]);
        assert_eq!(Layout::MainSidebar.ratios(), &[2, 1]);
    }

    #[test]
    fn test_allowed_layouts() {
        assert!(!SectionKind::Media.allows(Layout::MainSidebar));
        assert!(SectionKind::Content.allows(Layout::MainSidebar));
        assert!(SectionKind::Hero.allows(Layout::FullWidth));
        assert!(!SectionKind::Hero.allows(Layout::ThreeColumn));
        for kind in SectionKind::ALL {
            assert!(kind.allows(Layout::FullWidth), "{kind} must allow full-width");
        }
    }

    #[test]
    fn test_check_layout_error() {
        let err = SectionKind::Media.check_layout(Layout::MainSidebar).unwrap_err();
        assert!(matches!(err, EditorError::InvalidLayout { .. }));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("main-sidebar".parse::<Layout>().unwrap(), Layout::MainSidebar);
        assert_eq!("hero".parse::<SectionKind>().unwrap(), SectionKind::Hero);
        assert_eq!(Layout::ThreeColumn.to_string(), "three-column");
        assert!("grid".parse::<Layout>().is_err());
        assert!("footer".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Layout::TwoColumn).unwrap();
        assert_eq!(json, "\"two-column\"");
        let kind: SectionKind = serde_json::from_str("\"features\"").unwrap();
        assert_eq!(kind, SectionKind::Features);
    }

    #[test]
    fn test_redistribute_round_robin() {
        let columns = vec![column("left", &["c1", "c2"]), column("right", &["c3", "c4"])];
        let next = redistribute(&columns, Layout::ThreeColumn);

        assert_eq!(next.len(), 3);
        assert_eq!(next[0].id, "left");
        assert_eq!(next[0].components, vec!["c1", "c4"]);
        assert_eq!(next[1].components, vec!["c2"]);
        assert_eq!(next[2].components, vec!["c3"]);
    }

    #[test]
    fn test_redistribute_to_single_column_keeps_order() {
        let columns = vec![
            column("left", &["a", "b"]),
            column("center", &["c"]),
            column("right", &["d"]),
        ];
        let next = redistribute(&columns, Layout::FullWidth);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].components, vec!["a", "b", "c", "d"]);
    }
}
