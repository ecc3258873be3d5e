//! Benchmarks for rendering wide and deep schemas.
//!
//! Run with: cargo bench -p as3gen

use as3gen::{FileGenerator, MemoryOutputDirectory, generate};
use as3gen_core::{Field, FieldType, RecordType, SchemaFile};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wide_record(name: &str, fields: u32) -> RecordType {
    let scalars: Vec<FieldType> = FieldType::ALL
        .into_iter()
        .filter(|ty| ty.is_scalar())
        .collect();
    (1..=fields).fold(RecordType::new(name), |record, number| {
        let index = usize::try_from(number).unwrap_or_default() % (scalars.len() + 2);
        let field = match index {
            0 => Field::message(format!("child_{number}"), number, "Leaf"),
            1 => Field::enumeration(format!("kind_{number}"), number, "Kind"),
            _ => Field::new(format!("value_{number}"), number, scalars[index - 2]),
        };
        record.with_field(if number % 3 == 0 { field.repeated() } else { field })
    })
}

fn wide_schema(records: usize, fields: u32) -> SchemaFile {
    (0..records).fold(SchemaFile::new("bench.proto", "bench.wide"), |schema, index| {
        schema.with_message(
            wide_record(&format!("Record{index}"), fields)
                .with_nested(wide_record("Inner", fields / 2)),
        )
    })
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for fields in [8, 64, 256] {
        let schema = wide_schema(4, fields);
        group.bench_with_input(BenchmarkId::new("generate_all", fields), &schema, |b, schema| {
            b.iter(|| {
                let files = FileGenerator::new(black_box(schema)).generate_all();
                black_box(files)
            });
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let schema = wide_schema(16, 32);

    c.bench_function("generate_to_memory", |b| {
        b.iter(|| {
            let mut output = MemoryOutputDirectory::new();
            let manifest = generate(black_box(&schema), "output_list_file=files.txt", &mut output);
            black_box(manifest)
        });
    });
}

criterion_group!(benches, bench_render, bench_generate);
criterion_main!(benches);
