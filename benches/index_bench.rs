use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput};

use arei::{BitString, BuildOptions, Index, TrieVariant};

const KEY_COUNTS: [usize; 3] = [1_000, 10_000, 50_000];
const KEY_BITS: u32 = 24;

/// Deterministic pseudo-random sorted, distinct key set of `n` keys,
/// `KEY_BITS` long, generated with a fixed LCG so runs are comparable
/// across benchmark invocations.
fn make_keys(n: usize) -> Vec<BitString> {
    let mut state: u64 = 0x9e3779b97f4a7c15;
    let mut set = std::collections::BTreeSet::new();
    while set.len() < n {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let bits: Vec<bool> = (0..KEY_BITS).map(|b| (state >> b) & 1 == 1).collect();
        set.insert(BitString::from_bits(bits));
    }
    set.into_iter().collect()
}

fn build_index(keys: &[BitString], variant: TrieVariant) -> Index {
    let mut options = BuildOptions::default();
    options.trie_variant = variant;
    Index::build(keys, &options).expect("build should converge")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index build");
    for &n in &KEY_COUNTS {
        let keys = make_keys(n);
        group.sampling_mode(SamplingMode::Auto);
        group.throughput(Throughput::Elements(n as u64));
        for variant in [TrieVariant::Hzft, TrieVariant::Shzft] {
            let label = format!("{n}/{variant:?}");
            group.bench_with_input(BenchmarkId::from_parameter(label), &keys, |b, keys| {
                b.iter(|| build_index(keys, variant))
            });
        }
    }
    group.finish();
}

fn bench_weak_prefix_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("weak prefix search");
    for &n in &KEY_COUNTS {
        let keys = make_keys(n);
        for variant in [TrieVariant::Hzft, TrieVariant::Shzft] {
            let idx = build_index(&keys, variant);
            let label = format!("{n}/{variant:?}");
            group.sampling_mode(SamplingMode::Auto);
            group.throughput(Throughput::Elements(keys.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(label), &keys, |b, keys| {
                b.iter(|| {
                    for key in keys {
                        idx.weak_prefix_search(key).expect("key should resolve");
                    }
                })
            });
        }
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_build, bench_weak_prefix_search
}
criterion_main!(benches);
