// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Front-end throughput: tokenize and parse a representative statement.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use andb_parser::{Lexer, parse_statement};

const QUERY: &str =
    "select a1, a2 + a3, t.a4 from a t where a1 <= 100 and (a2 = 3 or a3 <> 4);";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| Lexer::new(black_box(QUERY)).tokenize().unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| parse_statement(black_box(QUERY)).unwrap())
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
