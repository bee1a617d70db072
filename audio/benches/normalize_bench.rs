use accentid_audio::{Format, RawAudio, normalize};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn make_sine(freq_hz: f64, n_frames: usize, channels: u16, sample_rate: u32) -> Vec<f32> {
    let mut out = Vec::with_capacity(n_frames * channels as usize);
    for i in 0..n_frames {
        let t = i as f64 / sample_rate as f64;
        let s = (0.5 * (freq_hz * 2.0 * std::f64::consts::PI * t).sin()) as f32;
        for _ in 0..channels {
            out.push(s);
        }
    }
    out
}

fn bench_normalize_passthrough(c: &mut Criterion) {
    let raw = RawAudio::new(make_sine(440.0, 16000, 1, 16000), Format::MONO_16K);

    c.bench_function("normalize_16k_mono_1s", |b| {
        b.iter(|| {
            let _ = black_box(normalize(black_box(&raw)));
        });
    });
}

fn bench_normalize_44k_stereo(c: &mut Criterion) {
    let raw = RawAudio::new(make_sine(440.0, 44100, 2, 44100), Format::STEREO_44K);

    c.bench_function("normalize_44k_stereo_1s", |b| {
        b.iter(|| {
            let _ = black_box(normalize(black_box(&raw)));
        });
    });
}

fn bench_normalize_48k_stereo_10s(c: &mut Criterion) {
    let raw = RawAudio::new(make_sine(440.0, 480000, 2, 48000), Format::STEREO_48K);

    c.bench_function("normalize_48k_stereo_10s", |b| {
        b.iter(|| {
            let _ = black_box(normalize(black_box(&raw)));
        });
    });
}

criterion_group!(
    benches,
    bench_normalize_passthrough,
    bench_normalize_44k_stereo,
    bench_normalize_48k_stereo_10s,
);
criterion_main!(benches);
