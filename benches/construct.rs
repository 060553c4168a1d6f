use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{thread_rng, Rng};
use sparse_suffix_array::{SequenceKind, SparseSuffixArray};

const DNA_LEN: usize = 1 << 20;
const PROTEIN_LEN: usize = 1 << 18;

criterion_group!(
    benches,
    dna_by_sparseness,
    protein_by_sparseness,
    unoptimized_reference,
);
criterion_main!(benches);

fn dna_by_sparseness(c: &mut Criterion) {
    let text = random_sequence(b"ACGT", DNA_LEN);
    for &k in &[1u32, 2, 3, 4] {
        let name = format!("build dna-1m s={}", k);
        let text = text.clone();
        c.bench_function(name.as_ref(), move |b| bench_build(b, &text[..], k, SequenceKind::Dna));
    }
}

fn protein_by_sparseness(c: &mut Criterion) {
    let text = random_sequence(b"ACDEFGHIKLMNPQRSTVWY", PROTEIN_LEN);
    for &k in &[1u32, 2, 3] {
        let name = format!("build protein-256k s={}", k);
        let text = text.clone();
        c.bench_function(name.as_ref(), move |b| {
            bench_build(b, &text[..], k, SequenceKind::Protein)
        });
    }
}

fn unoptimized_reference(c: &mut Criterion) {
    let text = random_sequence(b"ACGT", DNA_LEN / 4);
    c.bench_function("build dna-256k s=3 unoptimized", move |b| {
        b.iter(|| SparseSuffixArray::build_unoptimized(&text[..], 3, SequenceKind::Dna).unwrap());
    });
}

fn bench_build(b: &mut Bencher, text: &[u8], sparseness: u32, kind: SequenceKind) {
    b.iter(|| SparseSuffixArray::build(text, sparseness, kind).unwrap());
}

fn random_sequence(alphabet: &[u8], len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0, alphabet.len())])
        .collect()
}
