//! Benchmarks for tab completion and command parsing.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use marquee::library::{MediaStore, SharedStore};
use marquee::repl::{CommandParser, ShellCompleter};

const LINES: &[(&str, &str)] = &[
    ("command", "li"),
    ("flag_choice", "suggest -t "),
    ("tagged", "video movies list -d G"),
    ("flat", "media movies list -a \"Mark"),
    ("nested", "library show add SW_REB "),
    ("help", "help media movies "),
];

fn bench_complete(c: &mut Criterion) {
    let completer = ShellCompleter::new(SharedStore::new(MediaStore::builtin()));
    let mut group = c.benchmark_group("complete");

    for (name, line) in LINES {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| completer.complete(black_box(line)));
        });
    }

    group.finish();
}

fn bench_completer_creation(c: &mut Criterion) {
    c.bench_function("completer_new", |b| {
        b.iter(|| ShellCompleter::new(SharedStore::new(MediaStore::builtin())));
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_media_list", |b| {
        b.iter(|| {
            CommandParser::parse(black_box(
                r#"media movies list -r PG PG-13 -d "George Lucas" -a "Mark Hamill""#,
            ))
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_complete, bench_completer_creation, bench_parse);
criterion_main!(benches);
