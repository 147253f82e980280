//! Path template resolver abstraction.
//!
//! A resolver is the only contract between the resource catalog and the
//! code that fills placeholders in a chosen template. The catalog passes
//! the template and the caller's context through untouched.

use crate::context::PathTemplateContext;
use crate::error::{ContextError, TemplateError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

static PLACEHOLDER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w[\w.-]*$").unwrap());

/// Compiled `{name: regex}` patterns, keyed by the regex source.
static PLACEHOLDER_PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// The anchored form of `pattern`, compiled once per process.
fn compiled(pattern: &str) -> Result<Regex, regex::Error> {
    let mut patterns = PLACEHOLDER_PATTERNS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(regex) = patterns.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(&format!("^(?:{})$", pattern))?;
    patterns.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

pub trait PathTemplateResolver: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Fill the placeholders of `template` using `context`.
    fn resolve(&self, template: &str, context: &dyn PathTemplateContext) -> Result<String, TemplateError>;
}

impl fmt::Debug for dyn PathTemplateResolver + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Returns templates unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl PathTemplateResolver for IdentityResolver {
    fn name(&self) -> &str { "identity" }

    fn resolve(&self, template: &str, _context: &dyn PathTemplateContext) -> Result<String, TemplateError> {
        Ok(template.to_string())
    }
}

/// Fills `{name}` and `{name: regex}` placeholders with named string
/// values from the context.
///
/// Only `String` and `&'static str` values are read, so other types must
/// be added with [`ContextMap::with_segment`](crate::ContextMap::with_segment);
/// a `u32` added with `put_named` fails with [`ContextError::TypeMismatch`].
///
/// A value filling a `{name: regex}` placeholder must match the whole
/// regex. Each distinct regex is compiled once and cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver;

impl PlaceholderResolver {
    fn segment(template: &str, name: &str, context: &dyn PathTemplateContext) -> Result<String, TemplateError> {
        match context.get_named::<String>(name) {
            Ok(value) => Ok(value.clone()),
            Err(ContextError::TypeMismatch { .. }) => Ok(context.get_named::<&'static str>(name)?.to_string()),
            Err(ContextError::MissingNamed { .. }) => Err(TemplateError::Unresolved {
                template:    template.to_string(),
                placeholder: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn check(template: &str, name: &str, pattern: &str, value: &str) -> Result<(), TemplateError> {
        let regex = compiled(pattern)
            .map_err(|e| Self::malformed(template, &format!("invalid regex for '{}': {}", name, e)))?;
        if regex.is_match(value) {
            Ok(())
        } else {
            Err(TemplateError::Mismatch {
                template:    template.to_string(),
                placeholder: name.to_string(),
                value:       value.to_string(),
                pattern:     pattern.to_string(),
            })
        }
    }

    fn malformed(template: &str, reason: &str) -> TemplateError {
        TemplateError::Malformed {
            template: template.to_string(),
            reason:   reason.to_string(),
        }
    }
}

impl PathTemplateResolver for PlaceholderResolver {
    fn name(&self) -> &str { "placeholder" }

    fn resolve(&self, template: &str, context: &dyn PathTemplateContext) -> Result<String, TemplateError> {
        let mut path = String::with_capacity(template.len());
        let mut placeholder = String::new();
        // brace nesting; regex quantifiers such as `{3}` nest inside a placeholder
        let mut depth = 0usize;

        for c in template.chars() {
            match (c, depth) {
                ('{', 0) => depth = 1,
                ('}', 0) => return Err(Self::malformed(template, "unbalanced '}'")),
                ('}', 1) => {
                    let (name, pattern) = match placeholder.split_once(':') {
                        Some((name, pattern)) => (name.trim(), Some(pattern.trim())),
                        None => (placeholder.trim(), None),
                    };
                    if name.is_empty() {
                        return Err(Self::malformed(template, "empty placeholder name"));
                    }
                    if !PLACEHOLDER_NAME.is_match(name) {
                        return Err(Self::malformed(template, &format!("invalid placeholder name '{}'", name)));
                    }

                    let value = Self::segment(template, name, context)?;
                    if let Some(pattern) = pattern.filter(|pattern| !pattern.is_empty()) {
                        Self::check(template, name, pattern, &value)?;
                    }
                    path.push_str(&value);
                    placeholder.clear();
                    depth = 0;
                }
                ('{', _) => {
                    placeholder.push(c);
                    depth += 1;
                }
                ('}', _) => {
                    placeholder.push(c);
                    depth -= 1;
                }
                (_, 0) => path.push(c),
                (_, _) => placeholder.push(c),
            }
        }

        if depth > 0 {
            return Err(Self::malformed(template, "unterminated placeholder"));
        }
        Ok(path)
    }
}

/// Adapts a closure into a [`PathTemplateResolver`].
pub struct FnResolver<F> {
    name: String,
    f:    F,
}

impl<F> FnResolver<F>
where
    F: Fn(&str, &dyn PathTemplateContext) -> Result<String, TemplateError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> PathTemplateResolver for FnResolver<F>
where
    F: Fn(&str, &dyn PathTemplateContext) -> Result<String, TemplateError> + Send + Sync,
{
    fn name(&self) -> &str { &self.name }

    fn resolve(&self, template: &str, context: &dyn PathTemplateContext) -> Result<String, TemplateError> {
        (self.f)(template, context)
    }
}
