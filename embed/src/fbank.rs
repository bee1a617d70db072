//! Log mel filterbank frames.
//!
//! Kaldi-compatible: Povey window, 25ms frames, 10ms shift, per-frame DC
//! removal and pre-emphasis. [`FbankModel`] exposes the frames as a
//! [`FeatureModel`] so the extractor can mean-pool them like any other model
//! output. No CMVN is applied: per-utterance mean normalization would zero
//! out the mean-pooled vector.

use std::f64::consts::PI;

use crate::{EmbedError, FeatureModel, Frames};

/// Configures mel filterbank feature extraction.
#[derive(Debug, Clone)]
pub struct FbankConfig {
    /// Input sample rate in Hz (default: 16000).
    pub sample_rate: usize,
    /// Number of mel filterbank channels (default: 80).
    pub num_mels: usize,
    /// Frame length in samples (default: 400 = 25ms @ 16kHz).
    pub frame_length: usize,
    /// Frame shift in samples (default: 160 = 10ms @ 16kHz).
    pub frame_shift: usize,
    /// Pre-emphasis coefficient (default: 0.97).
    pub pre_emphasis: f64,
    /// Floor for mel energies before the log (default: 1e-10).
    pub energy_floor: f64,
    /// Low cutoff frequency for mel bins (default: 20 Hz).
    pub low_freq: f64,
    /// High cutoff frequency, non-positive = offset from Nyquist (default: -400).
    pub high_freq: f64,
    /// Remove DC offset per frame (default: true).
    pub remove_dc: bool,
    /// Use Povey window (hamming^0.85) instead of Hamming (default: true).
    pub povey_window: bool,
}

impl Default for FbankConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            num_mels: 80,
            frame_length: 400,
            frame_shift: 160,
            pre_emphasis: 0.97,
            energy_floor: 1e-10,
            low_freq: 20.0,
            high_freq: -400.0,
            remove_dc: true,
            povey_window: true,
        }
    }
}

impl FbankConfig {
    /// Number of frames produced for `n` samples.
    pub fn num_frames(&self, n: usize) -> usize {
        if self.frame_shift == 0 || n < self.frame_length {
            return 0;
        }
        (n - self.frame_length) / self.frame_shift + 1
    }

    fn resolved_high_freq(&self) -> f64 {
        if self.high_freq <= 0.0 {
            self.sample_rate as f64 / 2.0 + self.high_freq
        } else {
            self.high_freq
        }
    }
}

/// Precomputed window and filterbank for one configuration.
struct Analyzer {
    cfg: FbankConfig,
    fft_size: usize,
    window: Vec<f64>,
    filterbank: Vec<Vec<f64>>,
}

impl Analyzer {
    fn new(cfg: FbankConfig) -> Self {
        let fft_size = cfg.frame_length.next_power_of_two();
        let window = if cfg.povey_window {
            povey_window(cfg.frame_length)
        } else {
            hamming_window(cfg.frame_length)
        };
        let filterbank = mel_filterbank(
            cfg.num_mels,
            fft_size,
            cfg.sample_rate,
            cfg.low_freq,
            cfg.resolved_high_freq(),
        );
        Self {
            cfg,
            fft_size,
            window,
            filterbank,
        }
    }

    fn frame(&self, chunk: &[f32], fft_buf: &mut [(f64, f64)], power: &mut [f64]) -> Vec<f32> {
        let cfg = &self.cfg;
        let mut frame: Vec<f64> = chunk.iter().map(|&s| s as f64).collect();

        if cfg.remove_dc {
            let mean = frame.iter().sum::<f64>() / frame.len() as f64;
            frame.iter_mut().for_each(|v| *v -= mean);
        }

        if cfg.pre_emphasis > 0.0 {
            for i in (1..frame.len()).rev() {
                frame[i] -= cfg.pre_emphasis * frame[i - 1];
            }
            frame[0] *= 1.0 - cfg.pre_emphasis;
        }

        fft_buf.fill((0.0, 0.0));
        for (slot, (v, w)) in fft_buf.iter_mut().zip(frame.iter().zip(&self.window)) {
            *slot = (v * w, 0.0);
        }
        fft(fft_buf);

        for (p, &(re, im)) in power.iter_mut().zip(fft_buf.iter()) {
            *p = re * re + im * im;
        }

        self.filterbank
            .iter()
            .map(|filter| {
                let energy: f64 = filter.iter().zip(power.iter()).map(|(w, p)| w * p).sum();
                energy.max(cfg.energy_floor).ln() as f32
            })
            .collect()
    }

    fn compute(&self, samples: &[f32]) -> Option<Vec<Vec<f32>>> {
        let cfg = &self.cfg;
        if cfg.frame_length == 0 || cfg.num_mels == 0 {
            return None;
        }
        let num_frames = cfg.num_frames(samples.len());
        if num_frames == 0 {
            return None;
        }

        let mut fft_buf = vec![(0.0f64, 0.0f64); self.fft_size];
        let mut power = vec![0.0f64; self.fft_size / 2 + 1];
        let frames = (0..num_frames)
            .map(|f| {
                let offset = f * cfg.frame_shift;
                let chunk = &samples[offset..offset + cfg.frame_length];
                self.frame(chunk, &mut fft_buf, &mut power)
            })
            .collect();
        Some(frames)
    }
}

/// Extracts log mel filterbank energies from `f32` samples in `[-1, 1]`.
///
/// Output: `[num_frames][num_mels]`. Returns `None` if the audio is too
/// short for a single frame.
pub fn compute_fbank(samples: &[f32], cfg: &FbankConfig) -> Option<Vec<Vec<f32>>> {
    Analyzer::new(cfg.clone()).compute(samples)
}

/// [`FeatureModel`] backed by log mel filterbank frames.
///
/// Needs no model file. Its embeddings are far less discriminative than a
/// self-supervised model's, but the whole pipeline runs without external
/// assets.
pub struct FbankModel {
    analyzer: Analyzer,
    tag: String,
}

impl FbankModel {
    pub fn new(cfg: FbankConfig) -> Self {
        let tag = format!("fbank-{}", cfg.num_mels);
        Self {
            analyzer: Analyzer::new(cfg),
            tag,
        }
    }

    pub fn config(&self) -> &FbankConfig {
        &self.analyzer.cfg
    }
}

impl Default for FbankModel {
    fn default() -> Self {
        Self::new(FbankConfig::default())
    }
}

impl FeatureModel for FbankModel {
    fn frames(&self, samples: &[f32]) -> Result<Frames, EmbedError> {
        let min = self.min_samples();
        let rows = self
            .analyzer
            .compute(samples)
            .ok_or(EmbedError::AudioTooShort {
                min_samples: min,
                got_samples: samples.len(),
            })?;
        Frames::from_rows(rows)
    }

    fn dimension(&self) -> usize {
        self.analyzer.cfg.num_mels
    }

    fn min_samples(&self) -> usize {
        self.analyzer.cfg.frame_length
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}

fn hamming_window(n: usize) -> Vec<f64> {
    let denom = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
        .collect()
}

/// Povey window (hamming^0.85) used by Kaldi.
fn povey_window(n: usize) -> Vec<f64> {
    hamming_window(n).into_iter().map(|w| w.powf(0.85)).collect()
}

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filters, `[num_mels][fft_size / 2 + 1]`.
fn mel_filterbank(
    num_mels: usize,
    fft_size: usize,
    sample_rate: usize,
    low_freq: f64,
    high_freq: f64,
) -> Vec<Vec<f64>> {
    let half_fft = fft_size / 2 + 1;
    let mel_low = hz_to_mel(low_freq);
    let mel_high = hz_to_mel(high_freq);
    let step = (mel_high - mel_low) / (num_mels + 1) as f64;

    let bins: Vec<usize> = (0..num_mels + 2)
        .map(|i| {
            let hz = mel_to_hz(mel_low + i as f64 * step);
            let bin = (hz * fft_size as f64 / sample_rate as f64).floor() as isize;
            bin.clamp(0, half_fft as isize - 1) as usize
        })
        .collect();

    bins.windows(3)
        .map(|w| {
            let (left, center, right) = (w[0], w[1], w[2]);
            let mut filter = vec![0.0f64; half_fft];
            if center > left {
                for k in left..=center {
                    filter[k] = (k - left) as f64 / (center - left) as f64;
                }
            }
            if right > center {
                for k in center..=right {
                    filter[k] = (right - k) as f64 / (right - center) as f64;
                }
            }
            filter
        })
        .collect()
}

/// In-place radix-2 FFT over `(re, im)` pairs. Length must be a power of 2.
fn fft(x: &mut [(f64, f64)]) {
    let n = x.len();
    if n <= 1 {
        return;
    }

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            x.swap(i, j);
        }
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let angle = -2.0 * PI / size as f64;
        let wn = (angle.cos(), angle.sin());
        for start in (0..n).step_by(size) {
            let mut w = (1.0, 0.0);
            for k in 0..half {
                let u = x[start + k];
                let v = x[start + k + half];
                let t = (w.0 * v.0 - w.1 * v.1, w.0 * v.1 + w.1 * v.0);
                x[start + k] = (u.0 + t.0, u.1 + t.1);
                x[start + k + half] = (u.0 - t.0, u.1 - t.1);
                w = (w.0 * wn.0 - w.1 * wn.1, w.0 * wn.1 + w.1 * wn.0);
            }
        }
        size <<= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f64, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (0.5 * (2.0 * PI * freq * i as f64 / 16000.0).sin()) as f32)
            .collect()
    }

    #[test]
    fn config_default() {
        let cfg = FbankConfig::default();
        assert_eq!(cfg.sample_rate, 16000);
        assert_eq!(cfg.num_mels, 80);
        assert_eq!(cfg.num_frames(16000), 98);
        assert_eq!(cfg.num_frames(399), 0);
    }

    #[test]
    fn too_short() {
        assert!(compute_fbank(&[0.0; 100], &FbankConfig::default()).is_none());
    }

    #[test]
    fn silence_hits_floor() {
        let features = compute_fbank(&[0.0; 800], &FbankConfig::default()).unwrap();
        assert_eq!(features.len(), 3);
        let floor = (1e-10f64).ln() as f32;
        assert!(features.iter().flatten().all(|&v| (v - floor).abs() < 1e-4));
    }

    #[test]
    fn tone_varies_across_bins() {
        let features = compute_fbank(&tone(440.0, 16000), &FbankConfig::default()).unwrap();
        assert_eq!(features.len(), 98);
        assert_eq!(features[0].len(), 80);
        assert!(features[0].windows(2).any(|w| (w[0] - w[1]).abs() > 0.01));
    }

    #[test]
    fn different_tones_differ() {
        let cfg = FbankConfig::default();
        let low = compute_fbank(&tone(300.0, 4000), &cfg).unwrap();
        let high = compute_fbank(&tone(3000.0, 4000), &cfg).unwrap();
        let diff: f32 = low[5].iter().zip(&high[5]).map(|(a, b)| (a - b).abs()).sum();
        assert!(diff > 1.0);
    }

    #[test]
    fn model_frames() {
        let model = FbankModel::default();
        assert_eq!(model.dimension(), 80);
        assert_eq!(model.min_samples(), 400);
        assert_eq!(model.tag(), "fbank-80");

        let frames = model.frames(&tone(440.0, 8000)).unwrap();
        assert_eq!(frames.dim(), 80);
        assert_eq!(frames.num_frames(), 48);

        assert!(matches!(
            model.frames(&[0.1; 10]),
            Err(EmbedError::AudioTooShort { min_samples: 400, got_samples: 10 })
        ));
    }

    #[test]
    fn fft_impulse() {
        let mut buf = vec![(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)];
        fft(&mut buf);
        for (re, im) in &buf {
            assert!((re - 1.0).abs() < 1e-10);
            assert!(im.abs() < 1e-10);
        }
    }

    #[test]
    fn fft_parseval() {
        let n = 16;
        let mut buf: Vec<(f64, f64)> = (0..n)
            .map(|i| ((2.0 * PI * 3.0 * i as f64 / n as f64).sin(), 0.0))
            .collect();
        let time: f64 = buf.iter().map(|(r, i)| r * r + i * i).sum();
        fft(&mut buf);
        let freq: f64 = buf.iter().map(|(r, i)| r * r + i * i).sum();
        assert!((time * n as f64 - freq).abs() < 1e-8);
    }

    #[test]
    fn mel_roundtrip() {
        for &hz in &[0.0, 100.0, 440.0, 1000.0, 8000.0] {
            assert!((hz - mel_to_hz(hz_to_mel(hz))).abs() < 1e-6);
        }
    }
}
