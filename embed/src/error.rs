use thiserror::Error;

/// Errors returned when a waveform cannot be turned into an embedding.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embed: expected {expected} Hz audio, got {got} Hz")]
    SampleRate { expected: u32, got: u32 },

    #[error("embed: audio too short: need at least {min_samples} samples, got {got_samples}")]
    AudioTooShort {
        min_samples: usize,
        got_samples: usize,
    },

    #[error("embed: waveform is all zeros")]
    Silent,

    #[error("embed: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("embed: model produced no frames")]
    NoFrames,

    #[error("embed: non-finite value in embedding")]
    NonFinite,

    #[error("embed: embedding has zero norm")]
    ZeroNorm,

    #[error("embed: load model: {0}")]
    Load(String),

    #[error("embed: model error: {0}")]
    Model(String),
}
