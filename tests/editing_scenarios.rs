//! End-to-end editing scenarios through the public API.
//!
//! These tests validate that:
//! - Structural invariants hold after every step of an editing session
//! - Undo and redo restore exact snapshots
//! - Layout changes keep every component
//! - Template insertion matches the equivalent manual operations

use mediakit_editor::{
    Direction, Document, EditorConfig, EditorError, EditorSession, Fields, Layout, SectionKind,
    StaticCatalog, TemplateCatalog,
};

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn text(value: &str) -> Fields {
    fields(&[("text", value)])
}

/// Section shape with IDs stripped: kind, layout, and per column the
/// `(type, content)` of each component in order.
fn shape(doc: &Document, section_id: &str) -> (SectionKind, Layout, Vec<Vec<(String, Fields)>>) {
    let section = doc.section(section_id).unwrap();
    let columns = section
        .columns
        .iter()
        .map(|column| {
            column
                .components
                .iter()
                .map(|id| {
                    let c = doc.component(id).unwrap();
                    (c.component_type.clone(), c.content.clone())
                })
                .collect()
        })
        .collect();
    (section.kind, section.layout, columns)
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn second_hero_is_rejected() {
    let doc = Document::with_section(SectionKind::Hero, Layout::FullWidth).unwrap();
    let mut session = EditorSession::new(doc);

    for layout in [Layout::FullWidth, Layout::TwoColumn] {
        let err = session
            .add_section(SectionKind::Hero, layout, None)
            .unwrap_err();
        assert!(matches!(err, EditorError::SingleInstanceViolation(_)));
    }
    assert_eq!(session.document().len(), 1);
    assert!(!session.can_undo());
}

#[test]
fn two_to_three_columns_deals_round_robin() {
    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
    let section = session
        .add_section(SectionKind::Content, Layout::TwoColumn, None)
        .unwrap();

    let mut ids = Vec::new();
    for (column, label) in [("left", "c1"), ("left", "c2"), ("right", "c3"), ("right", "c4")] {
        let id = session
            .add_component_to_column(&section, column, "bio", text(label), Fields::new(), None)
            .unwrap();
        ids.push(id);
    }

    session.change_layout(&section, Layout::ThreeColumn).unwrap();

    let s = session.document().section(&section).unwrap();
    let names: Vec<&str> = s.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(names, vec!["left", "center", "right"]);
    assert_eq!(s.columns[0].components, vec![ids[0].clone(), ids[3].clone()]);
    assert_eq!(s.columns[1].components, vec![ids[1].clone()]);
    assert_eq!(s.columns[2].components, vec![ids[2].clone()]);
}

#[test]
fn undo_and_redo_an_added_component() {
    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
    let section = session.document().sections()[0].id.clone();
    let before = session.document().clone();

    let id = session
        .add_component_to_column(&section, "main", "bio", text("Hello"), Fields::new(), None)
        .unwrap();
    let after = session.document().clone();

    session.undo().unwrap();
    assert_eq!(session.document(), &before);
    assert!(session.document().component(&id).is_none());

    session.redo().unwrap();
    assert_eq!(session.document(), &after);
    assert_eq!(session.document().component(&id).unwrap().field("text"), Some("Hello"));
}

#[test]
fn deleting_a_section_drops_its_components() {
    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
    let doomed = session
        .add_section(SectionKind::Media, Layout::TwoColumn, None)
        .unwrap();
    let c1 = session
        .add_component_to_column(&doomed, "left", "gallery", Fields::new(), Fields::new(), None)
        .unwrap();
    let c2 = session
        .add_component_to_column(&doomed, "right", "image", Fields::new(), Fields::new(), None)
        .unwrap();

    session.delete_section(&doomed).unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 1);
    assert!(!doc.components.contains_key(&c1));
    assert!(!doc.components.contains_key(&c2));
    assert!(doc.validate().is_ok());
}

#[test]
fn bio_with_image_template() {
    let catalog = StaticCatalog::builtin();
    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();

    let id = session.insert_template(&catalog, "bio-with-image", None).unwrap();
    let (kind, layout, columns) = shape(session.document(), &id);

    assert_eq!(kind, SectionKind::Content);
    assert_eq!(layout, Layout::TwoColumn);
    assert_eq!(columns[0].len(), 1);
    assert_eq!(columns[0][0].0, "bio");
    assert_eq!(columns[1].len(), 1);
    assert_eq!(columns[1][0].0, "image");

    let template = catalog.get("bio-with-image").unwrap();
    assert_eq!(columns[0][0].1, template.components[0].content);
    assert_eq!(columns[1][0].1, template.components[1].content);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn last_section_cannot_be_deleted() {
    for kind in SectionKind::ALL {
        let doc = Document::with_section(kind, Layout::FullWidth).unwrap();
        let mut session = EditorSession::new(doc);
        let only = session.document().sections()[0].id.clone();

        let err = session.delete_section(&only).unwrap_err();
        assert!(matches!(err, EditorError::LastSectionViolation));
        assert_eq!(session.document().len(), 1);
    }
}

#[test]
fn invariants_hold_through_an_editing_session() {
    let catalog = StaticCatalog::builtin();
    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
    let first = session.document().sections()[0].id.clone();

    fn check(session: &EditorSession, step: &str) {
        if let Err(e) = session.document().validate() {
            panic!("invariant broken after {step}: {e}");
        }
    }

    let hero = session.insert_template(&catalog, "hero-centered", None).unwrap();
    check(&session, "insert hero");
    while session.move_section(&hero, Direction::Up).unwrap() {}
    check(&session, "move hero to top");

    let topics = session.insert_template(&catalog, "topics-grid", Some(&hero)).unwrap();
    check(&session, "insert topics");

    let moved = session.document().section(&topics).unwrap().columns[2].components[0].clone();
    session.move_component(&moved, &first, "main", Some(0)).unwrap();
    check(&session, "move component across sections");

    let copy = session.duplicate_section(&topics).unwrap();
    check(&session, "duplicate section");

    session.change_layout(&copy, Layout::FullWidth).unwrap();
    check(&session, "change layout");

    let dup = session.duplicate_component(&moved).unwrap();
    check(&session, "duplicate component");

    session.remove_component(&dup).unwrap();
    check(&session, "remove component");

    session.delete_section(&topics).unwrap();
    check(&session, "delete section");

    // Failures leave nothing half-done
    let snapshot = session.document().clone();
    assert!(session.move_component(&moved, &copy, "sidebar", None).is_err());
    assert!(session.change_layout(&copy, Layout::MainSidebar).is_err());
    assert!(session.insert_template(&catalog, "hero-split", None).is_err());
    assert!(session.insert_template(&catalog, "no-such-template", None).is_err());
    assert_eq!(session.document(), &snapshot);
    check(&session, "rejected operations");

    while session.can_undo() {
        session.undo().unwrap();
        check(&session, "undo");
    }
    while session.can_redo() {
        session.redo().unwrap();
        check(&session, "redo");
    }
    assert_eq!(session.document(), &snapshot);
}

#[test]
fn undo_round_trip_for_every_operation() {
    let catalog = StaticCatalog::builtin();
    let mut base = EditorSession::blank(EditorConfig::default()).unwrap();
    let section = base
        .insert_template(&catalog, "topics-grid", None)
        .unwrap();
    let component = base.document().section(&section).unwrap().columns[0].components[0].clone();
    let first = base.document().sections()[0].id.clone();
    let start = base.into_document();

    type Op = Box<dyn Fn(&mut EditorSession)>;
    let ops: Vec<(&str, Op)> = vec![
        ("add_section", Box::new(|s: &mut EditorSession| { s.add_section(SectionKind::Media, Layout::TwoColumn, None).unwrap(); })),
        ("delete_section", { let id = section.clone(); Box::new(move |s: &mut EditorSession| s.delete_section(&id).unwrap()) }),
        ("move_section", { let id = section.clone(); Box::new(move |s: &mut EditorSession| { assert!(s.move_section(&id, Direction::Up).unwrap()); }) }),
        ("duplicate_section", { let id = section.clone(); Box::new(move |s: &mut EditorSession| { s.duplicate_section(&id).unwrap(); }) }),
        ("change_layout", { let id = section.clone(); Box::new(move |s: &mut EditorSession| s.change_layout(&id, Layout::TwoColumn).unwrap()) }),
        ("update_section_settings", { let id = section.clone(); Box::new(move |s: &mut EditorSession| s.update_section_settings(&id, fields(&[("background", "#fff")])).unwrap()) }),
        ("add_component", { let id = first.clone(); Box::new(move |s: &mut EditorSession| { s.add_component_to_column(&id, "main", "cta", Fields::new(), Fields::new(), None).unwrap(); }) }),
        ("remove_component", { let id = component.clone(); Box::new(move |s: &mut EditorSession| s.remove_component(&id).unwrap()) }),
        ("move_component", { let (c, t) = (component.clone(), first.clone()); Box::new(move |s: &mut EditorSession| s.move_component(&c, &t, "main", None).unwrap()) }),
        ("duplicate_component", { let id = component.clone(); Box::new(move |s: &mut EditorSession| { s.duplicate_component(&id).unwrap(); }) }),
        ("update_component_content", { let id = component.clone(); Box::new(move |s: &mut EditorSession| s.update_component_content(&id, fields(&[("title", "Changed")])).unwrap()) }),
        ("update_component_styles", { let id = component.clone(); Box::new(move |s: &mut EditorSession| s.update_component_styles(&id, fields(&[("color", "red")])).unwrap()) }),
        ("insert_template", Box::new(|s: &mut EditorSession| { s.insert_template(&StaticCatalog::builtin(), "cta-banner", None).unwrap(); })),
    ];

    for (name, op) in ops {
        let mut session = EditorSession::new(start.clone());
        op(&mut session);
        let applied = session.document().clone();
        assert_ne!(&applied, &start, "{name} changed nothing");

        session.undo().unwrap();
        assert_eq!(session.document(), &start, "undo of {name}");
        session.redo().unwrap();
        assert_eq!(session.document(), &applied, "redo of {name}");
    }
}

#[test]
fn layout_changes_keep_component_count() {
    let mut doc = Document::with_section(SectionKind::Content, Layout::ThreeColumn).unwrap();
    let section = doc.sections()[0].id.clone();
    for (i, column) in ["left", "center", "right", "left", "center"].iter().enumerate() {
        doc.add_component_to_column(&section, column, "bio", text(&i.to_string()), Fields::new(), None)
            .unwrap();
    }

    for layout in [
        Layout::FullWidth,
        Layout::MainSidebar,
        Layout::TwoColumn,
        Layout::ThreeColumn,
        Layout::FullWidth,
    ] {
        doc.change_layout(&section, layout).unwrap();
        let s = doc.section(&section).unwrap();
        assert_eq!(s.component_ids().count(), 5, "after {layout}");
        assert_eq!(s.columns.len(), layout.column_count());
        assert_eq!(doc.component_count(), 5);
    }
}

#[test]
fn template_insertion_matches_manual_operations() {
    let catalog = StaticCatalog::builtin();

    for template in catalog.templates() {
        let base = Document::with_section(SectionKind::Content, Layout::FullWidth).unwrap();

        let mut via_template = base.clone();
        let inserted = via_template.insert_template(&catalog, &template.id, None).unwrap();

        let mut manual = base.clone();
        let section = manual.add_section(template.kind, template.layout, None).unwrap();
        let default_column = template.layout.column_names()[0];
        for spec in &template.components {
            manual
                .add_component_to_column(
                    &section,
                    spec.column.as_deref().unwrap_or(default_column),
                    &spec.component_type,
                    spec.content.clone(),
                    Fields::new(),
                    None,
                )
                .unwrap();
        }

        assert_eq!(
            shape(&via_template, &inserted),
            shape(&manual, &section),
            "template {}",
            template.id
        );
        assert_eq!(via_template.len(), manual.len());
        assert_eq!(via_template.component_count(), manual.component_count());
    }
}
