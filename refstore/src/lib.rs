//! Reference embedding storage.
//!
//! One embedding per accent class, keyed by lower-case class name.
//! [`DirStore`] keeps each reference in its own `<class>.emb` file (see
//! [`codec`] for the layout); [`MemoryStore`] keeps them in a map.

pub mod codec;
pub mod cosine;
mod dir;
mod error;
mod memory;
mod store;

pub use codec::{decode, encode};
pub use cosine::cosine_similarity;
pub use dir::DirStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{ReferenceStore, validate_class_name};
