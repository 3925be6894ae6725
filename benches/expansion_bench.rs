use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glaive::cancel::Deadline;
use glaive::dictionary::{MemoryTermDictionary, MemoryTermDictionaryBuilder};
use glaive::expand::FuzzyExpander;
use glaive::levenshtein::{LevenshteinMatcher, levenshtein_distance, levenshtein_distance_bounded};

/// Deterministic pseudo-words over a 6-letter alphabet.
fn generate_words(count: usize) -> Vec<String> {
    let alphabet = ['a', 'c', 'e', 'n', 'r', 't'];
    (0..count)
        .map(|i| {
            let len = 4 + i % 6;
            let mut state = i as u64 * 2_654_435_761 + 17;
            (0..len)
                .map(|_| {
                    state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    alphabet[(state >> 33) as usize % alphabet.len()]
                })
                .collect()
        })
        .collect()
}

fn build_dictionary(words: &[String]) -> MemoryTermDictionary {
    let mut builder = MemoryTermDictionaryBuilder::new();
    for (doc_id, word) in words.iter().enumerate() {
        builder.add_term(doc_id as u64, "body", word, 1).unwrap();
    }
    builder.build()
}

fn bench_distance(c: &mut Criterion) {
    let words = generate_words(200);
    let query: Vec<char> = "centaur".chars().collect();
    let candidates: Vec<Vec<char>> = words.iter().map(|w| w.chars().collect()).collect();

    let mut group = c.benchmark_group("edit_distance");

    group.bench_function("full_matrix", |b| {
        b.iter(|| {
            for word in &words {
                black_box(levenshtein_distance(black_box("centaur"), black_box(word)));
            }
        })
    });

    group.bench_function("bounded_2", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(levenshtein_distance_bounded(
                    black_box(&query),
                    black_box(candidate),
                    2,
                ));
            }
        })
    });

    let matcher = LevenshteinMatcher::new("centaur");
    group.bench_function("matcher_similar", |b| {
        b.iter(|| {
            for word in &words {
                black_box(matcher.similar(black_box(word), 0.5));
            }
        })
    });

    group.finish();
}

fn bench_fuzzy_expansion(c: &mut Criterion) {
    let words = generate_words(50_000);
    let dict = build_dictionary(&words);
    let deadline = Deadline::none();

    let mut group = c.benchmark_group("fuzzy_expansion");

    for prefix_length in [0, 1, 2, 3] {
        group.bench_function(format!("prefix_{prefix_length}"), |b| {
            b.iter(|| {
                let expansion = FuzzyExpander::new("body", "centaur")
                    .min_similarity(0.7)
                    .prefix_length(prefix_length)
                    .max_terms(usize::MAX)
                    .expand(black_box(&dict), &deadline)
                    .unwrap();
                black_box(expansion.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance, bench_fuzzy_expansion);
criterion_main!(benches);
