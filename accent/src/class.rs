use std::fmt;
use std::str::FromStr;

use accentid_refstore::validate_class_name;
use serde::{Deserialize, Serialize};

use crate::AccentError;

/// Accent class label, e.g. `american`.
///
/// Always lower-case `[a-z0-9_-]`, 1 to 64 characters. Parsing trims
/// surrounding whitespace and lower-cases, so `" British "` and `british`
/// name the same class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentClass(String);

impl AccentClass {
    pub fn new(name: &str) -> Result<Self, AccentError> {
        let name = name.trim().to_lowercase();
        validate_class_name(&name).map_err(|_| AccentError::InvalidClass(name.clone()))?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The classes used when no configuration names any.
    pub fn defaults() -> Vec<AccentClass> {
        ["american", "australian", "british"]
            .into_iter()
            .map(|n| AccentClass(n.to_string()))
            .collect()
    }
}

impl fmt::Display for AccentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccentClass {
    type Err = AccentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccentClass {
    type Error = AccentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<AccentClass> for String {
    fn from(c: AccentClass) -> Self {
        c.0
    }
}

impl AsRef<str> for AccentClass {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
