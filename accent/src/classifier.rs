use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use accentid_embed::{EmbedError, Embedding};
use accentid_refstore::{ReferenceStore, cosine_similarity};
use serde::Serialize;
use tracing::debug;

use crate::{AccentClass, AccentError};

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Class whose reference is most similar to the query.
    pub best: AccentClass,
    /// Best similarity scaled to percent.
    pub confidence: f32,
    /// Cosine similarity to every configured class.
    pub scores: BTreeMap<AccentClass, f32>,
}

/// Scores a query embedding against the stored reference of every
/// configured class.
///
/// References are read from the store on every call, so a rebuilt
/// reference takes effect on the next classification.
#[derive(Clone)]
pub struct Classifier {
    store: Arc<dyn ReferenceStore>,
    classes: BTreeSet<AccentClass>,
}

impl Classifier {
    pub fn new(store: Arc<dyn ReferenceStore>, classes: BTreeSet<AccentClass>) -> Self {
        Self { store, classes }
    }

    pub fn classes(&self) -> &BTreeSet<AccentClass> {
        &self.classes
    }

    /// Picks the class whose reference has the highest cosine similarity
    /// to `query`.
    ///
    /// Fails without scoring anything if any configured class lacks a
    /// reference. Equal scores resolve to the lexicographically first class.
    pub fn classify(&self, query: &Embedding) -> Result<ClassificationResult, AccentError> {
        if !query.is_finite() {
            return Err(EmbedError::NonFinite.into());
        }
        if query.dimension() == 0 || query.norm() == 0.0 {
            return Err(EmbedError::ZeroNorm.into());
        }
        if self.classes.is_empty() {
            return Err(AccentError::Config("no classes configured".into()));
        }

        let mut references = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            match self.store.get(class.as_str())? {
                Some(r) => references.push((class, r)),
                None => return Err(AccentError::MissingReference(class.to_string())),
            }
        }

        let mut scores = BTreeMap::new();
        let mut best: Option<(&AccentClass, f32)> = None;
        for (class, reference) in &references {
            check_compatible(class, query, reference)?;
            let score = cosine_similarity(query.as_slice(), reference.as_slice()).ok_or_else(
                || AccentError::IncompatibleReference {
                    class: class.to_string(),
                    reason: "similarity undefined (zero-norm reference)".into(),
                },
            )?;
            scores.insert((*class).clone(), score);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((class, score));
            }
        }

        let (best, score) = best.ok_or_else(|| AccentError::Config("no classes configured".into()))?;
        debug!(best = %best, score, classes = scores.len(), "classified");
        Ok(ClassificationResult {
            best: best.clone(),
            confidence: score * 100.0,
            scores,
        })
    }
}

fn check_compatible(
    class: &AccentClass,
    query: &Embedding,
    reference: &Embedding,
) -> Result<(), AccentError> {
    if reference.dimension() != query.dimension() {
        return Err(AccentError::IncompatibleReference {
            class: class.to_string(),
            reason: format!(
                "dimension {} does not match query dimension {}",
                reference.dimension(),
                query.dimension()
            ),
        });
    }
    if reference.tag() != query.tag() {
        return Err(AccentError::IncompatibleReference {
            class: class.to_string(),
            reason: format!(
                "built with {:?}, query uses {:?}; rebuild the reference",
                reference.tag(),
                query.tag()
            ),
        });
    }
    Ok(())
}
