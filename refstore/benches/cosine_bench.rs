use accentid_embed::Embedding;
use accentid_refstore::{DirStore, ReferenceStore, cosine_similarity, decode, encode};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn make_vec(dim: usize, seed: f32) -> Vec<f32> {
    (0..dim).map(|i| (i as f32 * 0.013 + seed).sin()).collect()
}

fn bench_cosine_768(c: &mut Criterion) {
    let a = make_vec(768, 0.1);
    let b = make_vec(768, 0.7);

    c.bench_function("cosine_similarity_768", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_codec_768(c: &mut Criterion) {
    let e = Embedding::new("wav2vec2-base+mono16k-meanpool-v1", make_vec(768, 0.3));
    let bytes = encode(&e).unwrap();

    c.bench_function("encode_768", |bench| {
        bench.iter(|| encode(black_box(&e)));
    });
    c.bench_function("decode_768", |bench| {
        bench.iter(|| decode(black_box(&bytes)));
    });
}

fn bench_dir_store_get(c: &mut Criterion) {
    let tmp = tempfile::tempdir().unwrap();
    let store = DirStore::new(tmp.path());
    let e = Embedding::new("wav2vec2-base+mono16k-meanpool-v1", make_vec(768, 0.5));
    store.put("british", &e).unwrap();

    c.bench_function("dir_store_get_768", |bench| {
        bench.iter(|| store.get(black_box("british")));
    });
}

criterion_group!(benches, bench_cosine_768, bench_codec_768, bench_dir_store_get);
criterion_main!(benches);
