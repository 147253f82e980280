//! Resource descriptors.

use crate::error::{Error, Result};
use hrefkit_model::{GlobMatcher, ModelPath, ModelType};
use hrefkit_template::PathTemplateResolver;
use std::fmt;
use std::sync::Arc;

/// What declared a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A resource method or sub-resource locator.
    Method { resource: String, method: String },
    /// A resource type.
    Type { name: String },
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Method { resource, method } => write!(f, "method={}.{}", resource, method),
            ResourceKind::Type { name } => write!(f, "type={}", name),
        }
    }
}

/// An immutable binding of a model path pattern to a path template and
/// the resolver that fills it.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    kind:     ResourceKind,
    path:     String,
    matcher:  GlobMatcher,
    resolver: Arc<dyn PathTemplateResolver>,
}

impl ResourceDescriptor {
    /// Create a descriptor.
    ///
    /// Fails with [`Error::InvalidDescriptor`] if `path` is blank.
    pub fn new(
        kind: ResourceKind,
        path: impl Into<String>,
        referenced_by: ModelPath,
        resolver: Arc<dyn PathTemplateResolver>,
    ) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(Error::InvalidDescriptor(format!(
                "{} referenced by {} has an empty path template",
                kind, referenced_by
            )));
        }
        Ok(Self {
            kind,
            path,
            matcher: GlobMatcher::new(referenced_by),
            resolver,
        })
    }

    /// Create a descriptor for a resource method.
    pub fn method(
        resource: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        referenced_by: ModelPath,
        resolver: Arc<dyn PathTemplateResolver>,
    ) -> Result<Self> {
        let kind = ResourceKind::Method {
            resource: resource.into(),
            method:   method.into(),
        };
        Self::new(kind, path, referenced_by, resolver)
    }

    /// Create a descriptor for a resource type.
    pub fn resource_type(
        name: impl Into<String>,
        path: impl Into<String>,
        referenced_by: ModelPath,
        resolver: Arc<dyn PathTemplateResolver>,
    ) -> Result<Self> {
        Self::new(ResourceKind::Type { name: name.into() }, path, referenced_by, resolver)
    }

    pub fn kind(&self) -> &ResourceKind { &self.kind }

    /// The unresolved path template.
    pub fn path(&self) -> &str { &self.path }

    /// The model path pattern.
    pub fn referenced_by(&self) -> &ModelPath { self.matcher.pattern() }

    pub fn template_resolver(&self) -> &dyn PathTemplateResolver { self.resolver.as_ref() }

    /// Check whether this descriptor's pattern matches the whole query.
    pub fn matches(&self, model_types: &[ModelType]) -> bool { self.matcher.matches(model_types) }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {} [{}, resolver={}]",
            self.referenced_by(),
            self.path,
            self.kind,
            self.resolver.name()
        )
    }
}
