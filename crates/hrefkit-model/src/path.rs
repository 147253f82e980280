//! Model path type and operations.

use crate::error::{ModelPathError, Result};
use crate::token::{MatchType, ModelType};
use std::fmt;

/// An immutable, ordered sequence of model types.
///
/// Two paths are equal when their token sequences are equal element-wise,
/// wildcard placement included.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ModelPath(Vec<ModelType>);

impl ModelPath {
    /// Create a path from a sequence of model types.
    pub fn with(types: impl IntoIterator<Item = ModelType>) -> Self {
        Self(types.into_iter().collect())
    }

    pub fn empty() -> Self { Self(Vec::new()) }

    /// Create a new path consisting of this path followed by `other`.
    pub fn concat(&self, other: &ModelPath) -> Self {
        self.concat_types(other.0.iter().copied())
    }

    /// Create a new path consisting of this path followed by `types`.
    pub fn concat_types(&self, types: impl IntoIterator<Item = ModelType>) -> Self {
        let mut path = self.0.clone();
        path.extend(types);
        Self(path)
    }

    /// Classify the token at `index`.
    pub fn match_type_at(&self, index: usize) -> Result<MatchType> {
        self.0
            .get(index)
            .map(ModelType::match_type)
            .ok_or(ModelPathError::OutOfBounds {
                index,
                len: self.0.len(),
            })
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_slice(&self) -> &[ModelType] { &self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelType> { self.0.iter() }

    pub fn has_wildcards(&self) -> bool { self.0.iter().any(ModelType::is_wildcard) }

    /// This path with every wildcard, of either kind, replaced by
    /// [`ModelType::any`].
    ///
    /// Two patterns with equal normalized forms claim the same resources.
    pub fn normalized(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|t| if t.is_wildcard() { ModelType::any() } else { *t })
                .collect(),
        )
    }
}

impl From<Vec<ModelType>> for ModelPath {
    fn from(types: Vec<ModelType>) -> Self { Self(types) }
}

impl From<&[ModelType]> for ModelPath {
    fn from(types: &[ModelType]) -> Self { Self(types.to_vec()) }
}

impl FromIterator<ModelType> for ModelPath {
    fn from_iter<I: IntoIterator<Item = ModelType>>(iter: I) -> Self { Self::with(iter) }
}

impl<'a> IntoIterator for &'a ModelPath {
    type Item = &'a ModelType;
    type IntoIter = std::slice::Iter<'a, ModelType>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl AsRef<[ModelType]> for ModelPath {
    fn as_ref(&self) -> &[ModelType] { &self.0 }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.0.as_slice() {
            return write!(f, "{}", single);
        }
        f.write_str("[")?;
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", token)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelPath({})", self)
    }
}
