//! WAV decoding.
//!
//! Integer PCM (8, 16, 24 or 32 bit) is scaled to `[-1, 1]`; 32-bit float
//! samples are passed through unchanged. Other containers (mp4, webm, ...)
//! have to be demuxed to WAV before they reach this crate.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::AudioError;
use crate::format::{Format, RawAudio};

/// Decodes a WAV stream into interleaved `f32` samples.
pub fn decode_wav<R: Read>(reader: R) -> Result<RawAudio, AudioError> {
    let mut wav = WavReader::new(reader)?;
    let spec = wav.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(AudioError::Decode(format!(
                    "unsupported float width: {} bits",
                    spec.bits_per_sample
                )));
            }
            wav.samples::<f32>().collect::<Result<_, _>>()?
        }
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(AudioError::Decode(format!(
                    "unsupported integer width: {} bits",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            wav.samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / scale) as f32))
                .collect::<Result<_, _>>()?
        }
    };

    debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "decoded wav"
    );
    Ok(RawAudio::new(
        samples,
        Format::new(spec.sample_rate, spec.channels),
    ))
}

/// Opens and decodes a WAV file.
pub fn load_wav(path: impl AsRef<Path>) -> Result<RawAudio, AudioError> {
    let file = File::open(path.as_ref())?;
    decode_wav(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn encode_i16(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buf = Cursor::new(Vec::new());
        {
            let mut w = WavWriter::new(&mut buf, spec).unwrap();
            for &s in samples {
                w.write_sample(s).unwrap();
            }
            w.finalize().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn decode_i16_stereo() {
        let data = encode_i16(&[16384, -16384, 0, 32767], 2, 44100);
        let raw = decode_wav(Cursor::new(data)).unwrap();
        assert_eq!(raw.format, Format::STEREO_44K);
        assert_eq!(raw.samples.len(), 4);
        assert!((raw.samples[0] - 0.5).abs() < 1e-6);
        assert!((raw.samples[1] + 0.5).abs() < 1e-6);
        assert_eq!(raw.samples[2], 0.0);
        assert!(raw.samples[3] < 1.0 && raw.samples[3] > 0.999);
    }

    #[test]
    fn decode_f32_mono() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut buf = Cursor::new(Vec::new());
        {
            let mut w = WavWriter::new(&mut buf, spec).unwrap();
            for s in [0.25f32, -0.75, 0.5] {
                w.write_sample(s).unwrap();
            }
            w.finalize().unwrap();
        }
        let raw = decode_wav(Cursor::new(buf.into_inner())).unwrap();
        assert_eq!(raw.format, Format::MONO_16K);
        assert_eq!(raw.samples, vec![0.25, -0.75, 0.5]);
    }

    #[test]
    fn decode_garbage_fails() {
        let err = decode_wav(Cursor::new(b"definitely not a wav file".to_vec())).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_) | AudioError::Io(_)));
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(matches!(
            load_wav("/nonexistent/accentid/clip.wav"),
            Err(AudioError::Io(_))
        ));
    }
}
