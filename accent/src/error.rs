use accentid_audio::AudioError;
use accentid_embed::EmbedError;
use accentid_refstore::StoreError;
use thiserror::Error;

/// Every failure the classifier and builder can report.
#[derive(Debug, Error)]
pub enum AccentError {
    #[error(transparent)]
    InvalidAudio(#[from] AudioError),

    #[error(transparent)]
    FeatureExtraction(#[from] EmbedError),

    #[error("accentid: no reference stored for class {0:?}")]
    MissingReference(String),

    #[error("accentid: write reference for class {class:?}: {source}")]
    ReferenceWrite {
        class: String,
        #[source]
        source: StoreError,
    },

    #[error("accentid: reference for class {class:?} is incompatible: {reason}")]
    IncompatibleReference { class: String, reason: String },

    #[error("accentid: class {0:?} is not configured")]
    UnknownClass(String),

    #[error("accentid: invalid class name {0:?}")]
    InvalidClass(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("accentid: config: {0}")]
    Config(String),
}

impl AccentError {
    /// Stable name of the error kind, for reports and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            AccentError::InvalidAudio(_) => "InvalidAudio",
            AccentError::FeatureExtraction(_) => "FeatureExtraction",
            AccentError::MissingReference(_) => "MissingReference",
            AccentError::ReferenceWrite { .. } => "ReferenceWrite",
            AccentError::IncompatibleReference { .. } => "IncompatibleReference",
            AccentError::UnknownClass(_) => "UnknownClass",
            AccentError::InvalidClass(_) => "InvalidClass",
            AccentError::Store(_) => "Store",
            AccentError::Config(_) => "Config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let e = AccentError::from(AudioError::Silent);
        assert_eq!(e.kind(), "InvalidAudio");
        assert_eq!(e.to_string(), "audio: input is silent");

        let e = AccentError::MissingReference("british".into());
        assert_eq!(e.kind(), "MissingReference");
        assert!(e.to_string().contains("british"));

        let e = AccentError::ReferenceWrite {
            class: "british".into(),
            source: StoreError::InvalidName("x".into()),
        };
        assert_eq!(e.kind(), "ReferenceWrite");
        assert!(std::error::Error::source(&e).is_some());
    }
}
