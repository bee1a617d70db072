//! Audio formats and sample containers.

/// Sample rate every normalized waveform is converted to.
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Describes the layout of decoded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
}

impl Format {
    /// Creates a format with the given sample rate and channel count.
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Creates a new format with the given sample rate and mono audio.
    pub const fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    /// Creates a new format with the given sample rate and stereo audio.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2)
    }

    /// Returns true for single-channel audio.
    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }
}

// Common format presets
impl Format {
    /// 16kHz mono, the normalized format.
    pub const MONO_16K: Format = Format::mono(TARGET_SAMPLE_RATE);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}

/// Decoded audio as it comes out of a decoder: interleaved `f32` samples in
/// `[-1, 1]` with an arbitrary channel count and sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAudio {
    pub samples: Vec<f32>,
    pub format: Format,
}

impl RawAudio {
    pub fn new(samples: Vec<f32>, format: Format) -> Self {
        Self { samples, format }
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.format.channels == 0 {
            return 0;
        }
        self.samples.len() / self.format.channels as usize
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.format.sample_rate as f64
    }
}

/// A single-channel waveform tagged with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Always 1; a waveform is mono by construction.
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn format(&self) -> Format {
        Format::mono(self.sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_presets() {
        assert_eq!(Format::MONO_16K.sample_rate, 16000);
        assert!(Format::MONO_16K.is_mono());
        assert_eq!(Format::STEREO_44K.channels, 2);
        assert_eq!(Format::STEREO_48K.sample_rate, 48000);
    }

    #[test]
    fn raw_audio_frames() {
        let raw = RawAudio::new(vec![0.0; 960], Format::stereo(48000));
        assert_eq!(raw.frames(), 480);
        assert!((raw.duration_secs() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn raw_audio_zero_channels() {
        let raw = RawAudio::new(vec![0.0; 10], Format::new(16000, 0));
        assert_eq!(raw.frames(), 0);
    }

    #[test]
    fn waveform_is_mono() {
        let w = Waveform::new(vec![0.1; 16000], 16000);
        assert_eq!(w.channels(), 1);
        assert_eq!(w.format(), Format::MONO_16K);
        assert!((w.duration_secs() - 1.0).abs() < 1e-9);
    }
}
