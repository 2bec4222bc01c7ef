//! Walkthrough of a media kit editing session.
//!
//! Covers: template composition, layout changes, history and persistence
//!
//! Run with: cargo run --release --example session_walkthrough

use std::time::Instant;

use mediakit_editor::{
    AutomergeStore, ComponentRegistry, DenyPremium, Direction, EditorConfig, EditorSession,
    Fields, Layout, OutlineRenderer, SectionKind, StaticCatalog,
};

fn main() {
    println!("========================================");
    println!(" Media Kit Editor Session Walkthrough");
    println!("========================================\n");

    let catalog = StaticCatalog::builtin();
    let registry = ComponentRegistry::with_builtin_types();

    let session = compose_page(&catalog, &registry);
    history_round_trip(session, &registry);
    persistence_overhead(&catalog);
}

// -----------------------------------------------------------------------------
// 1. Compose a page from templates and edit it
// -----------------------------------------------------------------------------
fn compose_page(catalog: &StaticCatalog, registry: &ComponentRegistry) -> EditorSession {
    println!("Step: Compose a page from templates");

    let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
    let blank = session.document().sections()[0].id.clone();

    session.insert_template(catalog, "hero-centered", None).unwrap();
    let bio = session.insert_template(catalog, "bio-with-image", None).unwrap();
    session.insert_template(catalog, "topics-grid", Some(&bio)).unwrap();
    session.insert_template(catalog, "contact-simple", None).unwrap();
    session.delete_section(&blank).unwrap();

    // The hero landed after the blank section; bring it to the top
    let hero = session.document().sections()[0].id.clone();
    let moved = session.move_section(&hero, Direction::Up).unwrap();
    println!("   Move hero up at top: {moved} (boundary, nothing committed)");

    match session.insert_template(catalog, "hero-split", None) {
        Ok(_) => println!("   Unexpected: second hero accepted"),
        Err(e) => println!("   Second hero refused: {e}"),
    }
    match session.insert_template_checked(&DenyPremium::new(), catalog, "stats-row", None) {
        Ok(_) => println!("   Unexpected: premium template accepted"),
        Err(e) => println!("   Free tier refused: {e}"),
    }

    let profile = Fields::from([
        ("name".to_string(), "Ada Lovelace".to_string()),
        ("headline".to_string(), "Mathematician & Writer".to_string()),
        ("email".to_string(), "ada@example.com".to_string()),
    ]);
    let changed = session.populate_from(&profile, registry).unwrap();
    println!("   Populated {changed} components from profile");

    println!();
    print!("{}", OutlineRenderer::new(registry).render(session.document()));
    println!();
    session
}

// -----------------------------------------------------------------------------
// 2. Lossy layout change and the undo that restores it
// -----------------------------------------------------------------------------
fn history_round_trip(mut session: EditorSession, registry: &ComponentRegistry) {
    println!("Step: Layout change, undo and redo");

    let topics = session
        .document()
        .sections()
        .iter()
        .find(|s| s.kind == SectionKind::Features)
        .map(|s| s.id.clone())
        .unwrap();
    let before = session.document().clone();

    session.change_layout(&topics, Layout::FullWidth).unwrap();
    let after = session.document().section(&topics).unwrap();
    println!(
        "   {} -> {} ({} components kept)",
        Layout::ThreeColumn,
        after.layout,
        after.component_ids().count()
    );

    session.undo().unwrap();
    println!("   Undo restores original: {}", session.document() == &before);
    session.redo().unwrap();
    println!(
        "   Redo re-applies: {}",
        session.document().section(&topics).unwrap().layout == Layout::FullWidth
    );
    println!(
        "   History depth: {} undo / {} redo",
        session.history().undo_levels(),
        session.history().redo_levels()
    );

    let mut store = AutomergeStore::new();
    session.save_to(&mut store).unwrap();
    let bytes = store.save();
    let mut reloaded = AutomergeStore::from_bytes(&bytes).unwrap();
    let restored = EditorSession::load_from(&mut reloaded, EditorConfig::default()).unwrap();
    println!(
        "   Reloaded from {} bytes, identical: {}",
        bytes.len(),
        restored.document() == session.document()
    );
    println!(
        "   Reloaded session starts with empty history: {}",
        !restored.can_undo()
    );

    println!();
    print!(
        "{}",
        OutlineRenderer::new(registry)
            .with_ids(true)
            .render(restored.document())
    );
    println!();
}

// -----------------------------------------------------------------------------
// 3. Snapshot cost as documents grow
// -----------------------------------------------------------------------------
fn persistence_overhead(catalog: &StaticCatalog) {
    println!("Step: Snapshot overhead");
    println!("   | Sections | Components | Binary Size | Save Time |");
    println!("   |----------|------------|-------------|-----------|");

    for copies in [1usize, 10, 50] {
        let mut session = EditorSession::blank(EditorConfig::default()).unwrap();
        for _ in 0..copies {
            session.insert_template(catalog, "topics-grid", None).unwrap();
            session.insert_template(catalog, "bio-with-image", None).unwrap();
        }

        let start = Instant::now();
        let mut store = AutomergeStore::new();
        session.save_to(&mut store).unwrap();
        let size = store.save().len();
        let duration = start.elapsed();

        println!(
            "   | {:<8} | {:<10} | {:>7} B   | {:>9.2?} |",
            session.document().len(),
            session.document().component_count(),
            size,
            duration
        );
    }
    println!();
}
