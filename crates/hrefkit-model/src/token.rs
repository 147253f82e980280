//! Model type tokens.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Wildcard marker matching exactly one model type.
pub enum AnyModel {}

/// Wildcard marker matching zero or more model types.
pub enum AnyModelSequence {}

/// How a single pattern token matches query tokens.
///
/// Ordered from most to least specific; ranking prefers the lower value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchType {
    Exact,
    Any,
    AnySequence,
}

/// An opaque, comparable symbol for a model type.
///
/// Equality and hashing consider only the [`TypeId`]; the captured name
/// is for diagnostics.
#[derive(Clone, Copy)]
pub struct ModelType {
    id:   TypeId,
    name: &'static str,
}

impl ModelType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id:   TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The single-token wildcard.
    pub fn any() -> Self { Self::of::<AnyModel>() }

    /// The variable-length wildcard.
    pub fn any_sequence() -> Self { Self::of::<AnyModelSequence>() }

    pub fn type_id(&self) -> TypeId { self.id }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str { self.name }

    /// Last path segment of the type name, without generic arguments.
    pub fn simple_name(&self) -> &'static str {
        let head = self.name.split('<').next().unwrap_or(self.name);
        head.rsplit("::").next().unwrap_or(head)
    }

    pub fn match_type(&self) -> MatchType {
        if self.id == TypeId::of::<AnyModelSequence>() {
            MatchType::AnySequence
        } else if self.id == TypeId::of::<AnyModel>() {
            MatchType::Any
        } else {
            MatchType::Exact
        }
    }

    pub fn is_wildcard(&self) -> bool { self.match_type() != MatchType::Exact }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.match_type() {
            MatchType::Exact => f.write_str(self.simple_name()),
            MatchType::Any => f.write_str("?"),
            MatchType::AnySequence => f.write_str("*"),
        }
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelType").field(&self.name).finish()
    }
}
