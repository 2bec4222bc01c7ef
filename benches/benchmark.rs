//! Benchmarks for document editing, history and persistence.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mediakit_editor::{
    AutomergeStore, Document, EditorConfig, EditorSession, Fields, Layout, SectionKind,
    SnapshotStore, StaticCatalog,
};

fn text(value: &str) -> Fields {
    Fields::from([("text".to_string(), value.to_string())])
}

/// A document with `sections` three-column sections holding
/// `per_column` components in each column.
fn build_document(sections: usize, per_column: usize) -> Document {
    let mut doc = Document::new();
    for _ in 0..sections {
        let section = doc
            .add_section(SectionKind::Features, Layout::ThreeColumn, None)
            .unwrap();
        for column in Layout::ThreeColumn.column_names() {
            for j in 0..per_column {
                doc.add_component_to_column(
                    &section,
                    column,
                    "topics",
                    text(&format!("Topic {j}")),
                    Fields::new(),
                    None,
                )
                .unwrap();
            }
        }
    }
    doc
}

fn bench_add_section(c: &mut Criterion) {
    c.bench_function("add_section", |b| {
        let mut doc = Document::new();
        b.iter(|| {
            black_box(
                doc.add_section(SectionKind::Content, Layout::TwoColumn, None)
                    .unwrap(),
            )
        })
    });
}

fn bench_add_component(c: &mut Criterion) {
    c.bench_function("add_component", |b| {
        let mut doc = Document::with_section(SectionKind::Content, Layout::FullWidth).unwrap();
        let section = doc.sections()[0].id.clone();
        b.iter(|| {
            black_box(
                doc.add_component_to_column(&section, "main", "bio", text("Hello"), Fields::new(), Some(0))
                    .unwrap(),
            )
        })
    });
}

fn bench_insert_template(c: &mut Criterion) {
    let catalog = StaticCatalog::builtin();
    c.bench_function("insert_template", |b| {
        let mut doc = Document::with_section(SectionKind::Content, Layout::FullWidth).unwrap();
        b.iter(|| {
            black_box(doc.insert_template(&catalog, "bio-with-image", None).unwrap())
        })
    });
}

fn bench_change_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("change_layout");

    for per_column in [1, 10, 50].iter() {
        let mut doc = build_document(1, *per_column);
        let section = doc.sections()[0].id.clone();
        let layouts = [Layout::FullWidth, Layout::TwoColumn, Layout::ThreeColumn];

        group.bench_with_input(
            BenchmarkId::from_parameter(per_column * 3),
            per_column,
            |b, _| {
                let mut i = 0usize;
                b.iter(|| {
                    doc.change_layout(&section, layouts[i % 3]).unwrap();
                    i += 1;
                })
            },
        );
    }

    group.finish();
}

fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo");

    for sections in [1, 10, 50].iter() {
        let mut session = EditorSession::new(build_document(*sections, 2));
        let section = session.document().sections()[0].id.clone();
        session
            .update_section_settings(&section, text("background"))
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(sections), sections, |b, _| {
            b.iter(|| {
                session.undo().unwrap();
                session.redo().unwrap();
            })
        });
    }

    group.finish();
}

fn bench_history_limit(c: &mut Criterion) {
    c.bench_function("edit_at_history_limit", |b| {
        let config = EditorConfig::new().with_history_limit(10);
        let mut session = EditorSession::with_config(build_document(5, 2), config);
        let section = session.document().sections()[0].id.clone();
        let mut i = 0u64;
        b.iter(|| {
            session
                .update_section_settings(&section, text(&format!("v{i}")))
                .unwrap();
            i += 1;
        })
    });
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("automerge_store");

    for sections in [1, 10, 50].iter() {
        let doc = build_document(*sections, 2);
        group.bench_with_input(BenchmarkId::from_parameter(sections), sections, |b, _| {
            b.iter(|| {
                let mut store = AutomergeStore::new();
                store.store(&doc).unwrap();
                black_box(store.save())
            })
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("automerge_load");

    for sections in [1, 10, 50].iter() {
        let mut store = AutomergeStore::new();
        store.store(&build_document(*sections, 2)).unwrap();
        let bytes = store.save();

        group.bench_with_input(BenchmarkId::from_parameter(sections), sections, |b, _| {
            b.iter(|| {
                let mut store = AutomergeStore::from_bytes(&bytes).unwrap();
                black_box(store.load().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let doc = build_document(50, 3);
    c.bench_function("validate_50_sections", |b| {
        b.iter(|| black_box(doc.validate().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_add_section,
    bench_add_component,
    bench_insert_template,
    bench_change_layout,
    bench_undo_redo,
    bench_history_limit,
    bench_store,
    bench_load,
    bench_validate,
);

criterion_main!(benches);
