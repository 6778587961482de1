//! Benchmarks comparing Rivit parsing vs pulldown-cmark (Markdown)
//!
//! Run with: cargo bench -p rivit-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulldown_cmark::{Options, Parser as MdParser};

const RIVIT_SAMPLE: &str = r#"# Benchmark document, version 1
INTRODUCTION

This is a paragraph with *emphasis*, **strong text**, and `inline code`.
It demonstrates the basic capabilities of the format.
/index
/about

LISTS

- First item with some content
-- A nested detail with a {glossary link}
-- Another detail pointing to [https://example.com the web]
--- Deeper still
- Second item with more content
- Third item concluding the list

CODE EXAMPLE

    fn fibonacci(n: u64) -> u64 {
        match n {
            0 => 0,
            1 => 1,
            _ => fibonacci(n - 1) + fibonacci(n - 2),
        }
    }

EMBEDS

@diagrams/pipeline.png The **parsing** pipeline
@photo.jpg

Escapes like \*this\* and \[that\] are taken literally.

End of document.
"#;

/// Equivalent Markdown content (as close as possible)
const MARKDOWN_SAMPLE: &str = r#"<!-- Benchmark document, version 1 -->
# Introduction

This is a paragraph with *emphasis*, **strong text**, and `inline code`.
It demonstrates the basic capabilities of the format.
[index](index)
[about](about)

## Lists

- First item with some content
  - A nested detail with a [glossary link](glossary)
  - Another detail pointing to [the web](https://example.com)
    - Deeper still
- Second item with more content
- Third item concluding the list

## Code Example

    fn fibonacci(n: u64) -> u64 {
        match n {
            0 => 0,
            1 => 1,
            _ => fibonacci(n - 1) + fibonacci(n - 2),
        }
    }

## Embeds

![The **parsing** pipeline](diagrams/pipeline.png)
![](photo.jpg)

Escapes like \*this\* and \[that\] are taken literally.

End of document.
"#;

fn bench_rivit_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(RIVIT_SAMPLE.len() as u64));

    group.bench_function("rivit", |b| {
        b.iter(|| {
            let doc = rivit_core::parse(black_box(RIVIT_SAMPLE));
            black_box(doc.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(MARKDOWN_SAMPLE), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let rivit_content: String = RIVIT_SAMPLE.repeat(*size);
        let markdown_content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(rivit_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("rivit", size),
            &rivit_content,
            |b, content| {
                b.iter(|| {
                    let doc = rivit_core::parse(black_box(content));
                    black_box(doc.len())
                })
            },
        );

        group.throughput(Throughput::Bytes(markdown_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("markdown", size),
            &markdown_content,
            |b, content| {
                b.iter(|| {
                    let parser = MdParser::new_ext(black_box(content), Options::all());
                    let events: Vec<_> = parser.collect();
                    black_box(events.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_inline_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let rivit_inline =
        "This has *emphasis*, **strong**, `code`, [https://example.com link], {home}, and \\*escapes\\*.";
    let markdown_inline =
        "This has *emphasis*, **strong**, `code`, [link](https://example.com), [home](home), and \\*escapes\\*.";

    group.bench_function("rivit_inline", |b| {
        b.iter(|| {
            let runs = rivit_core::parse_inline(black_box(rivit_inline));
            black_box(runs.len())
        })
    });

    group.bench_function("markdown_inline", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(markdown_inline), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rivit_parse,
    bench_scaling,
    bench_inline_parsing
);
criterion_main!(benches);
