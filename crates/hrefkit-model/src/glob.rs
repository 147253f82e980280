//! Anchored glob matching over token sequences.
//!
//! A pattern token is either exact (matches an equal query token), a
//! single wildcard (matches any one query token) or a sequence wildcard
//! (matches zero or more query tokens). The whole query must be consumed.
//!
//! Matching uses the two-pointer glob algorithm: on a mismatch it
//! backtracks only to the most recent sequence wildcard, so the cost is
//! bounded by `pattern.len() * query.len()`.

use crate::path::ModelPath;
use crate::token::{MatchType, ModelType};

/// A token that can take part in glob matching.
pub trait GlobToken: PartialEq {
    fn match_type(&self) -> MatchType;
}

impl GlobToken for ModelType {
    fn match_type(&self) -> MatchType { ModelType::match_type(self) }
}

/// Check whether `pattern` matches the entire `query`.
pub fn glob_match<T: GlobToken>(pattern: &[T], query: &[T]) -> bool {
    let mut p = 0;
    let mut q = 0;
    // (pattern index of the last sequence wildcard, query index it resumes from)
    let mut backtrack: Option<(usize, usize)> = None;

    while q < query.len() {
        if let Some(token) = pattern.get(p) {
            match token.match_type() {
                MatchType::AnySequence => {
                    backtrack = Some((p, q));
                    p += 1;
                    continue;
                }
                MatchType::Any => {
                    p += 1;
                    q += 1;
                    continue;
                }
                MatchType::Exact if *token == query[q] => {
                    p += 1;
                    q += 1;
                    continue;
                }
                MatchType::Exact => {}
            }
        }

        match backtrack {
            // let the sequence wildcard swallow one more query token
            Some((star, resume)) => {
                p = star + 1;
                q = resume + 1;
                backtrack = Some((star, resume + 1));
            }
            None => return false,
        }
    }

    pattern[p..]
        .iter()
        .all(|token| token.match_type() == MatchType::AnySequence)
}

/// A compiled pattern of model types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMatcher {
    pattern: ModelPath,
}

impl GlobMatcher {
    pub fn new(pattern: ModelPath) -> Self { Self { pattern } }

    pub fn pattern(&self) -> &ModelPath { &self.pattern }

    /// Check whether the pattern matches the entire query.
    pub fn matches(&self, query: impl AsRef<[ModelType]>) -> bool {
        glob_match(self.pattern.as_slice(), query.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnyModel, AnyModelSequence, model_path};

    struct A;
    struct B;
    struct C;
    struct D;

    fn matcher(pattern: ModelPath) -> GlobMatcher { GlobMatcher::new(pattern) }

    #[test]
    fn test_exact_pattern() {
        let m = matcher(model_path![A]);
        assert!(m.matches(model_path![A]));
        assert!(!m.matches(model_path![B]));
        assert!(!m.matches(model_path![A, A]));
        assert!(!m.matches(ModelPath::empty()));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty_query() {
        let m = matcher(ModelPath::empty());
        assert!(m.matches(ModelPath::empty()));
        assert!(!m.matches(model_path![A]));
    }

    #[test]
    fn test_any_matches_exactly_one() {
        let m = matcher(model_path![AnyModel]);
        assert!(m.matches(model_path![A]));
        assert!(m.matches(model_path![D]));
        assert!(!m.matches(ModelPath::empty()));
        assert!(!m.matches(model_path![A, B]));
    }

    #[test]
    fn test_lone_sequence_matches_everything() {
        let m = matcher(model_path![AnyModelSequence]);
        assert!(m.matches(ModelPath::empty()));
        assert!(m.matches(model_path![A]));
        assert!(m.matches(model_path![A, B]));
        assert!(m.matches(model_path![A, B, C]));
    }

    #[test]
    fn test_sequence_then_exact_anchors_at_end() {
        let m = matcher(model_path![AnyModelSequence, C]);
        assert!(m.matches(model_path![C]));
        assert!(m.matches(model_path![B, C]));
        assert!(m.matches(model_path![A, B, C]));
        assert!(!m.matches(ModelPath::empty()));
        assert!(!m.matches(model_path![C, D]));
    }

    #[test]
    fn test_multiple_sequences_backtrack() {
        let m = matcher(model_path![A, AnyModelSequence, B, AnyModelSequence, C]);
        assert!(m.matches(model_path![A, B, C]));
        assert!(m.matches(model_path![A, D, B, D, D, C]));
        assert!(m.matches(model_path![A, B, B, C, C]));
        assert!(!m.matches(model_path![A, C, B]));
        assert!(!m.matches(model_path![A, B]));
    }

    #[test]
    fn test_sequence_wildcard_needs_retry_after_partial_match() {
        // first B is a false start; the matcher must back up into the sequence
        let m = matcher(model_path![AnyModelSequence, B, C]);
        assert!(m.matches(model_path![B, A, B, C]));
        assert!(!m.matches(model_path![B, C, A]));
    }

    #[test]
    fn test_mixed_wildcards() {
        let m = matcher(model_path![AnyModel, AnyModelSequence, D]);
        assert!(m.matches(model_path![A, D]));
        assert!(m.matches(model_path![A, B, C, D]));
        assert!(!m.matches(model_path![D]));
    }
}
