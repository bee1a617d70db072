//! Audio decoding and normalization.
//!
//! Every clip that reaches the embedding model goes through [`normalize`],
//! which produces a mono waveform at [`TARGET_SAMPLE_RATE`]:
//!
//! 1. Multi-channel audio is averaged sample-wise into one channel
//! 2. Other sample rates are converted with a deterministic FFT resampler
//!
//! Reference audio and query audio must share this path; embeddings are only
//! comparable when derived from identically preprocessed input.
//!
//! # Example
//!
//! ```rust
//! use accentid_audio::{normalize, Format, RawAudio, TARGET_SAMPLE_RATE};
//!
//! // 10ms of stereo audio at 48kHz.
//! let samples = vec![0.25f32; 960];
//! let raw = RawAudio::new(samples, Format::stereo(48000));
//!
//! let wave = normalize(&raw).unwrap();
//! assert_eq!(wave.sample_rate(), TARGET_SAMPLE_RATE);
//! assert_eq!(wave.len(), 160);
//! ```

mod error;
pub mod format;
mod normalize;
pub mod resampler;
pub mod wav;

pub use error::AudioError;
pub use format::{Format, RawAudio, Waveform, TARGET_SAMPLE_RATE};
pub use normalize::{MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, downmix, normalize, normalize_samples};
pub use resampler::resample;
pub use wav::{decode_wav, load_wav};
