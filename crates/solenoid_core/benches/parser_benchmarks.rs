//! Criterion benchmarks for the assembly parser.
//!
//! Run with: `cargo bench --package solenoid_core`

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use solenoid_core::diagnostics::ErrorReporter;
use solenoid_core::parser::scanner::Scanner;
use solenoid_core::parser::{Dialect, Parser};

/// A synthetic typed-dialect program with `functions` function bodies, each
/// carrying a loop, a switch, and a handful of calls.
fn synthetic_source(functions: usize) -> String {
    let mut src = String::from("{\n");
    for i in 0..functions {
        src.push_str(&format!(
            "function f{i}(a:u256, b:u256) -> r:u256 {{\n\
             let acc:u256 := 0:u256\n\
             for {{ let i:u256 := 0:u256 }} lt(i, b) {{ i := inc(i) }} {{\n\
             acc := mix(acc, a)\n\
             switch acc case 0:u256 {{ acc := a }} default {{ break }}\n\
             }}\n\
             r := acc\n\
             }}\n"
        ));
    }
    src.push('}');
    src
}

fn bench_parse(c: &mut Criterion) {
    let dialect = Dialect::typed();
    let source = synthetic_source(50);

    c.bench_function("parse_typed_50_functions", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(&source));
            let mut reporter = ErrorReporter::new();
            let block = Parser::new(&mut scanner, &dialect, &mut reporter).parse(false);
            assert!(block.is_some());
            black_box(block)
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let source = synthetic_source(50);
    c.bench_function("scan_typed_50_functions", |b| {
        b.iter(|| black_box(Scanner::tokenize_all(black_box(&source))))
    });
}

criterion_group!(benches, bench_parse, bench_scan);
criterion_main!(benches);
