//! This bench test measures ordering a large, shuffled set of alarm rows of
//! the kind produced by a plant-wide export.

#![allow(missing_docs)]

use alarm_tags::{AlarmRow, domain::sort_rows};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

/// Generates rows covering every tag shape, in a scrambled order
fn generate_rows(count: usize) -> Vec<AlarmRow> {
    (0..count)
        .map(|i| {
            // spread neighbouring indices across the key space
            let n = i.wrapping_mul(7919) % count;
            let tag = match n % 4 {
                0 => format!("Line{}.Fault.{}", n % 17, n % 32),
                1 => format!("Faults[{}].{}", n % 251, n % 16),
                2 => format!("Motor{}[{}]", n % 13, n % 64),
                _ => format!("Station_{}", n),
            };
            AlarmRow::new(tag, format!("Alarm {n}")).unwrap()
        })
        .collect()
}

fn order_rows(c: &mut Criterion) {
    let rows = generate_rows(20_000);
    c.bench_function("order rows", |b| {
        b.iter_batched(
            || rows.clone(),
            |mut rows| sort_rows(&mut rows),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, order_rows);
criterion_main!(benches);
