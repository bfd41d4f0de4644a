use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scrivener_editor::{Command, Delta, Document, MemorySurface, Paragraph, Selection, View};

fn large_document(paragraphs: usize) -> Document {
    let text = (0..paragraphs)
        .map(|i| format!("Paragraph {} with some ordinary words in it", i))
        .collect::<Vec<_>>()
        .join("\n\n");
    Document::from_plain_text(&text)
}

fn fresh_view(document: &Document) -> View<MemorySurface> {
    let surface = MemorySurface::from_document(document);
    View::new(document.clone(), surface).unwrap()
}

fn resolve_updates(c: &mut Criterion) {
    let document = large_document(500);

    c.bench_function("resolve_100_updates_then_flush", |b| {
        b.iter(|| {
            let mut view = fresh_view(&document);
            for i in 0..100 {
                view.resolve([Delta::update(i * 5, Paragraph::new("updated"))])
                    .unwrap();
            }
            view.flush().unwrap();
            black_box(view.version())
        })
    });
}

fn backspace_merges(c: &mut Criterion) {
    let document = large_document(200);

    c.bench_function("backspace_merge_50_paragraphs", |b| {
        b.iter(|| {
            let mut view = fresh_view(&document);
            for _ in 0..50 {
                view.set_selection(Selection::caret(1, 0)).unwrap();
                Command::Backspace.execute(&mut view).unwrap();
            }
            view.flush().unwrap();
            black_box(view.paragraphs().len())
        })
    });
}

fn range_delete(c: &mut Criterion) {
    let document = large_document(500);

    c.bench_function("delete_range_across_400_paragraphs", |b| {
        b.iter(|| {
            let mut view = fresh_view(&document);
            view.set_selection(Selection::new((10, 3), (410, 5))).unwrap();
            Command::Backspace.execute(black_box(&mut view)).unwrap();
            view.flush().unwrap();
        })
    });
}

criterion_group!(benches, resolve_updates, backspace_merges, range_delete);
criterion_main!(benches);
