use tracing::debug;

use crate::error::AudioError;
use crate::format::{Format, RawAudio, TARGET_SAMPLE_RATE, Waveform};
use crate::resampler::resample;

/// Lowest accepted source sample rate.
pub const MIN_SAMPLE_RATE: u32 = 4_000;
/// Highest accepted source sample rate.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Converts decoded audio into a mono waveform at [`TARGET_SAMPLE_RATE`].
///
/// Channels are averaged sample-wise (no channel is discarded), then the
/// result is resampled if the source rate differs from the target.
///
/// Fails when the input is empty, silent after downmixing, contains
/// non-finite samples, has a sample rate outside
/// [`MIN_SAMPLE_RATE`]..=[`MAX_SAMPLE_RATE`] or has an inconsistent layout.
pub fn normalize(raw: &RawAudio) -> Result<Waveform, AudioError> {
    validate(raw)?;

    let Format {
        sample_rate,
        channels,
    } = raw.format;
    let mono = downmix(&raw.samples, channels);
    // Channels in opposite phase cancel out.
    if mono.iter().all(|&s| s == 0.0) {
        return Err(AudioError::Silent);
    }
    let samples = resample(&mono, sample_rate, TARGET_SAMPLE_RATE)?;

    debug!(
        channels,
        sample_rate,
        frames = mono.len(),
        normalized = samples.len(),
        "normalized audio"
    );
    Ok(Waveform::new(samples, TARGET_SAMPLE_RATE))
}

/// Convenience form of [`normalize`] for callers holding interleaved samples.
pub fn normalize_samples(
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<Waveform, AudioError> {
    normalize(&RawAudio::new(
        samples.to_vec(),
        Format::new(sample_rate, channels),
    ))
}

/// Averages interleaved channels into one channel.
///
/// A trailing partial frame is ignored.
pub fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| (frame.iter().map(|&s| s as f64).sum::<f64>() / n as f64) as f32)
                .collect()
        }
    }
}

fn validate(raw: &RawAudio) -> Result<(), AudioError> {
    let Format {
        sample_rate,
        channels,
    } = raw.format;
    if channels == 0 {
        return Err(AudioError::InvalidFormat("zero channels".into()));
    }
    if sample_rate == 0 {
        return Err(AudioError::InvalidFormat("zero sample rate".into()));
    }
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        return Err(AudioError::InvalidFormat(format!(
            "sample rate {sample_rate} Hz outside {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE}"
        )));
    }
    if raw.samples.is_empty() {
        return Err(AudioError::Empty);
    }
    if raw.samples.len() % channels as usize != 0 {
        return Err(AudioError::InvalidFormat(format!(
            "{} samples do not divide into {channels} channels",
            raw.samples.len()
        )));
    }
    if let Some(i) = raw.samples.iter().position(|s| !s.is_finite()) {
        return Err(AudioError::NonFinite(i));
    }
    if raw.samples.iter().all(|&s| s == 0.0) {
        return Err(AudioError::Silent);
    }
    Ok(())
}
