// Criterion benchmarks for morfa-dict.
//
// Builds a synthetic dictionary in memory (no data files needed) and
// measures lookups, full enumeration and construction.
//
// Run:
//   cargo bench -p morfa-dict

use criterion::{Criterion, criterion_group, criterion_main};
use morfa_dict::{Codec, Dictionary, DictionaryMetadata};

// ---------------------------------------------------------------------------
// Synthetic data
// ---------------------------------------------------------------------------

const STEMS: &[&str] = &[
    "dom", "kot", "pies", "rzeka", "miasto", "okno", "drzewo", "ulica", "szkoła", "książka",
];
const ENDINGS: &[(&str, &str)] = &[
    ("", "sg:nom"),
    ("u", "sg:gen"),
    ("owi", "sg:dat"),
    ("em", "sg:inst"),
    ("ie", "sg:loc"),
    ("y", "pl:nom"),
    ("ów", "pl:gen"),
    ("om", "pl:dat"),
    ("ami", "pl:inst"),
    ("ach", "pl:loc"),
];

/// `(word, stem, tag)` triples: every stem with a numeric suffix, inflected
/// with every ending.
fn entries(variants: usize) -> Vec<(String, Option<String>, Option<String>)> {
    let mut out = Vec::with_capacity(variants * STEMS.len() * ENDINGS.len());
    for v in 0..variants {
        for stem in STEMS {
            let lemma = format!("{stem}{v}");
            for (ending, tag) in ENDINGS {
                out.push((
                    format!("{lemma}{ending}"),
                    Some(lemma.clone()),
                    Some(format!("subst:{tag}")),
                ));
            }
        }
    }
    out
}

fn build(codec: Codec, variants: usize) -> Dictionary {
    let metadata = DictionaryMetadata::builder().encoder(codec).build();
    Dictionary::build(entries(variants), metadata).expect("synthetic dictionary")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_lookup(c: &mut Criterion) {
    let words: Vec<String> = entries(20).into_iter().map(|(w, _, _)| w).collect();
    for codec in [Codec::Suffix, Codec::Prefix, Codec::Infix] {
        let dict = build(codec, 20);
        let mut engine = dict.lookup_engine();
        c.bench_function(&format!("lookup_{}_words_{codec}", words.len()), |b| {
            b.iter(|| {
                for word in &words {
                    std::hint::black_box(engine.lookup(word).expect("lookup"));
                }
            });
        });
    }
}

fn bench_lookup_miss(c: &mut Criterion) {
    let dict = build(Codec::Suffix, 20);
    let mut engine = dict.lookup_engine();
    c.bench_function("lookup_miss", |b| {
        b.iter(|| std::hint::black_box(engine.lookup("martygalski").expect("lookup")));
    });
}

fn bench_iterate(c: &mut Criterion) {
    let dict = build(Codec::Suffix, 20);
    c.bench_function("cursor_all_entries", |b| {
        b.iter(|| {
            let mut cursor = dict.cursor();
            let mut n = 0usize;
            while let Some(entry) = cursor.advance() {
                n += entry.word().len();
            }
            std::hint::black_box(n)
        });
    });
    c.bench_function("iter_all_entries_detached", |b| {
        b.iter(|| std::hint::black_box(dict.iter().count()));
    });
}

fn bench_build(c: &mut Criterion) {
    let data = entries(20);
    c.bench_function(&format!("build_{}_entries", data.len()), |b| {
        b.iter(|| {
            let dict = Dictionary::build(data.iter().cloned(), DictionaryMetadata::default())
                .expect("build");
            std::hint::black_box(dict.fsa().arc_count())
        });
    });
}

criterion_group!(
    benches,
    bench_lookup,
    bench_lookup_miss,
    bench_iterate,
    bench_build,
);
criterion_main!(benches);
