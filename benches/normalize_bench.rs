use criterion::{black_box, criterion_group, criterion_main, Criterion};

use numplan::metadata::InMemoryMetadataSource;
use numplan::PhoneNumberUtil;

/// A varied set of candidates: plain, formatted, vanity, Unicode digits,
/// extensions. Exercises the metadata-free hot path of the engine.
fn setup_candidates() -> Vec<&'static str> {
    vec![
        "(650) 253-0000",
        "+44 20 8765 4321",
        "020 8765 4321 ext. 1234",
        "1-800-FLOWERS",
        "1-800-MICROSOFT",
        "\u{FF11}\u{FF12}\u{FF13}-456-7890",
        "١٢٣٤٥٦٧٨٩",
        "tel:+1-650-253-0000;ext=234",
        "0011 54 9 11 8765 4321 ext. 1234",
    ]
}

fn normalization_benchmark(c: &mut Criterion) {
    let phone_util =
        PhoneNumberUtil::with_source(Box::new(InMemoryMetadataSource::default()));
    let candidates = setup_candidates();

    let mut group = c.benchmark_group("Normalization");

    group.bench_function("is_viable_phone_number", |b| {
        b.iter(|| {
            for candidate in &candidates {
                let _ = phone_util.is_viable_phone_number(black_box(candidate));
            }
        })
    });

    group.bench_function("normalize", |b| {
        b.iter(|| {
            for candidate in &candidates {
                let _ = phone_util.normalize(black_box(candidate));
            }
        })
    });

    group.bench_function("maybe_strip_extension", |b| {
        b.iter(|| {
            for candidate in &candidates {
                let mut number = candidate.to_string();
                let _ = phone_util.maybe_strip_extension(black_box(&mut number));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, normalization_benchmark);
criterion_main!(benches);
