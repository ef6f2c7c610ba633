// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the folioflow-document crate: greedy wrapping of a
// long paragraph and full pagination of a text-heavy document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use folioflow_core::config::LayoutConfig;
use folioflow_core::types::{Block, FontFace, Style};
use folioflow_document::{BuiltinMetrics, LineWrapper, layout};

const PARAGRAPH: &str = "The layout engine wraps each paragraph greedily against measured \
    Helvetica widths, then walks a cursor down the page and breaks to a new page whenever \
    the next line would cross the bottom margin.";

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_wrap(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(20);
    let wrapper = LineWrapper::new(&BuiltinMetrics, FontFace::Regular, 12.0, 495.0);

    c.bench_function("wrap (20 paragraphs)", |b| {
        b.iter(|| black_box(wrapper.wrap(black_box(&text)).unwrap()));
    });
}

fn bench_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let blocks: Vec<Block> = (0..200)
        .map(|i| Block::Text {
            text: PARAGRAPH.to_owned(),
            style: Style {
                heading_level: if i % 25 == 0 { 2 } else { 0 },
                ..Style::default()
            },
        })
        .collect();

    c.bench_function("layout (200 blocks)", |b| {
        b.iter(|| black_box(layout(black_box(&blocks), &config, &BuiltinMetrics).unwrap()));
    });
}

criterion_group!(benches, bench_wrap, bench_layout);
criterion_main!(benches);
