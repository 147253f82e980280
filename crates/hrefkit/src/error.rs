//! Error types for resource path resolution and configuration.

use crate::descriptor::ResourceDescriptor;
use hrefkit_model::{ModelPath, ModelPathError};
use hrefkit_template::TemplateError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "cannot resolve a resource referenced by model types {model_path}; \
         perhaps a resource needs to declare it in referenced_by"
    )]
    ResourceNotFound { model_path: ModelPath },

    #[error("{model_path} matches multiple resources: {}", DisplayList(.candidates))]
    AmbiguousMatch {
        model_path: ModelPath,
        candidates: Vec<ResourceDescriptor>,
    },

    #[error("found duplicate resource descriptors: {}", DisplayList(.duplicates))]
    DuplicatePattern { duplicates: Vec<DuplicateGroup> },

    #[error("resource configuration error: {0}")]
    Configuration(String),

    #[error("invalid resource descriptor: {0}")]
    InvalidDescriptor(String),

    #[error(transparent)]
    ModelPath(#[from] ModelPathError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to load resource manifest: {0}")]
    Manifest(#[from] figment::Error),

    #[error("failed to parse resource manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error describes a bad catalog rather than a bad request.
    ///
    /// Configuration errors are meant to stop application startup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::DuplicatePattern { .. }
                | Error::Configuration(_)
                | Error::InvalidDescriptor(_)
                | Error::Manifest(_)
                | Error::Toml(_)
                | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Descriptors whose patterns claim the same model types.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The shared pattern with every wildcard normalized.
    pub pattern:     ModelPath,
    pub descriptors: Vec<ResourceDescriptor>,
}

impl fmt::Display for DuplicateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} claimed by {}", self.pattern, DisplayList(&self.descriptors))
    }
}

struct DisplayList<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for DisplayList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
