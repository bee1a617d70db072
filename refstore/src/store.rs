use std::collections::BTreeSet;

use accentid_embed::Embedding;

use crate::StoreError;

/// Keyed storage of one reference embedding per class.
///
/// Class names are lower-case `[a-z0-9_-]`, 1 to 64 characters; see
/// [`validate_class_name`]. `put` replaces any existing entry for the class.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use. A concurrent reader
/// sees either the previous reference or the new one, never a mix.
pub trait ReferenceStore: Send + Sync {
    /// Stores the reference for `class`, replacing any previous one.
    fn put(&self, class: &str, embedding: &Embedding) -> Result<(), StoreError>;

    /// Returns the reference for `class`, or `None` if absent.
    fn get(&self, class: &str) -> Result<Option<Embedding>, StoreError>;

    /// Classes with a stored reference, in lexicographic order.
    fn list_classes(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Deletes the reference for `class`. Returns whether one existed.
    fn remove(&self, class: &str) -> Result<bool, StoreError>;
}

const MAX_NAME_LEN: usize = 64;

/// Checks that `name` is usable as a class key (and as a file stem).
pub fn validate_class_name(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names() {
        for ok in ["american", "british", "en_in", "south-african", "x1"] {
            assert!(validate_class_name(ok).is_ok(), "{ok}");
        }
        for bad in ["", "British", "../etc", "a b", "a.emb"] {
            assert!(validate_class_name(bad).is_err(), "{bad}");
        }
        assert!(validate_class_name(&"x".repeat(64)).is_ok());
        assert!(validate_class_name(&"x".repeat(65)).is_err());
    }
}
