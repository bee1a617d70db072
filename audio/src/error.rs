use thiserror::Error;

/// Errors returned when audio cannot be turned into a usable waveform.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio: empty input")]
    Empty,

    #[error("audio: input is silent")]
    Silent,

    #[error("audio: invalid format: {0}")]
    InvalidFormat(String),

    #[error("audio: non-finite sample at index {0}")]
    NonFinite(usize),

    #[error("audio: decode: {0}")]
    Decode(String),

    #[error("audio: resample: {0}")]
    Resample(String),

    #[error("audio: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(e) => AudioError::Io(e),
            other => AudioError::Decode(other.to_string()),
        }
    }
}

impl From<rubato::ResamplerConstructionError> for AudioError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        AudioError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for AudioError {
    fn from(e: rubato::ResampleError) -> Self {
        AudioError::Resample(e.to_string())
    }
}
