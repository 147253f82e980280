//! Model type tokens, model paths and glob matching.
//!
//! # Architecture
//!
//! - `token.rs` - `ModelType` tokens and the two wildcard markers
//! - `path.rs` - Immutable `ModelPath` sequences
//! - `glob.rs` - Anchored glob matching over token sequences
//!
//! A model path names a resource by the chain of domain types used to
//! reach it. Patterns may contain [`AnyModel`] (exactly one type) and
//! [`AnyModelSequence`] (zero or more types).
//!
//! # Example
//!
//! ```
//! use hrefkit_model::{AnyModelSequence, GlobMatcher, model_path};
//!
//! struct Customer;
//! struct Order;
//!
//! let matcher = GlobMatcher::new(model_path![AnyModelSequence, Order]);
//! assert!(matcher.matches(&model_path![Customer, Order]));
//! assert!(!matcher.matches(&model_path![Order, Customer]));
//! ```

pub use error::{ModelPathError, Result};
pub use glob::{GlobMatcher, GlobToken, glob_match};
pub use path::ModelPath;
pub use token::{AnyModel, AnyModelSequence, MatchType, ModelType};

mod error;
mod glob;
mod path;
mod token;

/// Builds a [`ModelPath`] from a list of type names.
///
/// `model_path![]` yields the empty path.
#[macro_export]
macro_rules! model_path {
    () => {
        $crate::ModelPath::empty()
    };
    ($($ty:ty),+ $(,)?) => {
        $crate::ModelPath::with([$($crate::ModelType::of::<$ty>()),+])
    };
}
