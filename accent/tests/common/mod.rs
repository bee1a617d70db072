#![allow(dead_code)]

use std::path::{Path, PathBuf};

use accentid::{AccentClass, Config, ModelConfig, ModelKind};

/// Sum of sines at `freqs`, `secs` long, written as 16-bit PCM.
pub fn write_tone_wav(path: &Path, freqs: &[f32], sample_rate: u32, channels: u16, secs: f32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f32 * secs) as usize;
    let amp = 0.6 / freqs.len().max(1) as f32;
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let s: f32 = freqs
            .iter()
            .map(|f| amp * (2.0 * std::f32::consts::PI * f * t).sin())
            .sum();
        for _ in 0..channels {
            w.write_sample((s * 32767.0) as i16).unwrap();
        }
    }
    w.finalize().unwrap();
}

pub fn write_silent_wav(path: &Path, secs: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..(16000.0 * secs) as usize {
        w.write_sample(0i16).unwrap();
    }
    w.finalize().unwrap();
}

/// Distinct clips per default class, in mixed source formats.
pub struct Clips {
    pub american: PathBuf,
    pub australian: PathBuf,
    pub british: PathBuf,
}

pub fn make_clips(dir: &Path) -> Clips {
    let clips = Clips {
        american: dir.join("american.wav"),
        australian: dir.join("australian.wav"),
        british: dir.join("british.wav"),
    };
    write_tone_wav(&clips.american, &[180.0, 360.0, 540.0], 16000, 1, 1.0);
    write_tone_wav(&clips.australian, &[950.0, 2900.0], 44100, 2, 1.2);
    write_tone_wav(&clips.british, &[420.0, 1700.0, 5200.0], 48000, 2, 0.8);
    clips
}

/// Filterbank-backed configuration storing references under `store_dir`.
pub fn fbank_config(store_dir: &Path) -> Config {
    Config {
        classes: AccentClass::defaults(),
        store_dir: store_dir.to_path_buf(),
        model: ModelConfig {
            kind: ModelKind::Fbank,
            ..Default::default()
        },
    }
}
