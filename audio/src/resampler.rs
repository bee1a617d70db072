//! Rubato-based sample rate conversion.
//!
//! Uses rubato's FFT resampler, a pure Rust band-limited implementation.
//! The chunk size is fixed so the same input always yields the same output,
//! and the resampler delay is trimmed so output sample `i` lines up with
//! input time `i / dst_rate`.

use rubato::{FftFixedIn, Resampler};
use tracing::debug;

use crate::error::AudioError;

/// Number of input frames per FFT processing block.
const CHUNK_SIZE: usize = 1024;

/// Converts mono samples from `src_rate` to `dst_rate`.
///
/// The output holds exactly `ceil(len * dst_rate / src_rate)` samples.
/// Equal rates return a copy of the input.
pub fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Result<Vec<f32>, AudioError> {
    if src_rate == 0 || dst_rate == 0 {
        return Err(AudioError::InvalidFormat(format!(
            "sample rate must be positive: {src_rate} -> {dst_rate}"
        )));
    }
    if src_rate == dst_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler =
        FftFixedIn::<f32>::new(src_rate as usize, dst_rate as usize, CHUNK_SIZE, 1, 1)?;

    let expected = output_len(samples.len(), src_rate, dst_rate);
    let delay = resampler.output_delay();
    let wanted = delay + expected;
    debug!(
        src_rate,
        dst_rate,
        input = samples.len(),
        output = expected,
        delay,
        "resampling"
    );

    let mut out: Vec<f32> = Vec::with_capacity(wanted + CHUNK_SIZE);

    // Full chunks.
    let mut pos = 0;
    loop {
        let need = resampler.input_frames_next();
        if samples.len() - pos < need {
            break;
        }
        let block: [&[f32]; 1] = [&samples[pos..pos + need]];
        let chunk = resampler.process(&block[..], None)?;
        out.extend_from_slice(&chunk[0]);
        pos += need;
    }

    // Remaining partial chunk, zero-padded by rubato.
    if pos < samples.len() {
        let tail: [&[f32]; 1] = [&samples[pos..]];
        let chunk = resampler.process_partial(Some(&tail[..]), None)?;
        out.extend_from_slice(&chunk[0]);
    }

    // Flush the delay line.
    while out.len() < wanted {
        let chunk = resampler.process_partial::<&[f32]>(None, None)?;
        if chunk[0].is_empty() {
            break;
        }
        out.extend_from_slice(&chunk[0]);
    }

    let end = wanted.min(out.len());
    let start = delay.min(end);
    let mut resampled = out[start..end].to_vec();
    resampled.resize(expected, 0.0);
    Ok(resampled)
}

/// Returns the number of output samples for `len` input samples.
pub fn output_len(len: usize, src_rate: u32, dst_rate: u32) -> usize {
    if src_rate == 0 {
        return 0;
    }
    (len as u64 * dst_rate as u64).div_ceil(src_rate as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, n: usize, rate: u32) -> Vec<f32> {
        (0..n)
            .map(|i| (0.5 * (2.0 * PI * freq_hz * i as f64 / rate as f64).sin()) as f32)
            .collect()
    }

    fn rms(v: &[f32]) -> f64 {
        (v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / v.len() as f64).sqrt()
    }

    #[test]
    fn output_len_rounds_up() {
        assert_eq!(output_len(480, 48000, 16000), 160);
        assert_eq!(output_len(441, 44100, 16000), 160);
        assert_eq!(output_len(1, 44100, 16000), 1);
        assert_eq!(output_len(0, 44100, 16000), 0);
    }

    #[test]
    fn same_rate_passthrough() {
        let input = sine(440.0, 1600, 16000);
        let out = resample(&input, 16000, 16000).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn downsample_length() {
        let input = sine(440.0, 48000, 48000);
        let out = resample(&input, 48000, 16000).unwrap();
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn upsample_length() {
        let input = sine(440.0, 8000, 8000);
        let out = resample(&input, 8000, 16000).unwrap();
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn odd_ratio_length() {
        let input = sine(440.0, 44100, 44100);
        let out = resample(&input, 44100, 16000).unwrap();
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn short_input_shorter_than_chunk() {
        let input = sine(440.0, 300, 48000);
        let out = resample(&input, 48000, 16000).unwrap();
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn preserves_passband_energy() {
        let input = sine(440.0, 44100, 44100);
        let out = resample(&input, 44100, 16000).unwrap();
        // Skip the edges where the filter rings.
        let mid = &out[2000..14000];
        let expected = 0.5 / 2f64.sqrt();
        let got = rms(mid);
        assert!(
            (got - expected).abs() / expected < 0.05,
            "rms {got} should be close to {expected}"
        );
    }

    #[test]
    fn deterministic() {
        let input = sine(1000.0, 22050, 22050);
        let a = resample(&input, 22050, 16000).unwrap();
        let b = resample(&input, 22050, 16000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rate_rejected() {
        assert!(resample(&[0.1, 0.2], 0, 16000).is_err());
        assert!(resample(&[0.1, 0.2], 16000, 0).is_err());
    }
}
