//! Name lookup for model types and template resolvers.
//!
//! A manifest refers to types and resolvers by name; the application
//! registers what those names mean.

use crate::error::{Error, Result};
use hrefkit_model::{AnyModel, AnyModelSequence, ModelPath, ModelType};
use hrefkit_template::{IdentityResolver, PathTemplateResolver, PlaceholderResolver};
use std::collections::HashMap;
use std::sync::Arc;

/// Model types known by name.
///
/// The wildcards are always registered as `?`/`AnyModel` and
/// `*`/`AnyModelSequence`.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, ModelType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry
            .register_as::<AnyModel>("?")
            .register::<AnyModel>()
            .register_as::<AnyModelSequence>("*")
            .register::<AnyModelSequence>();
        registry
    }
}

impl TypeRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register `T` under its simple name.
    pub fn register<T: ?Sized + 'static>(&mut self) -> &mut Self {
        let model_type = ModelType::of::<T>();
        self.types.insert(model_type.simple_name().to_string(), model_type);
        self
    }

    pub fn register_as<T: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        self.types.insert(name.into(), ModelType::of::<T>());
        self
    }

    pub fn with<T: ?Sized + 'static>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn get(&self, name: &str) -> Option<ModelType> { self.types.get(name).copied() }

    /// Look up every name in `names`.
    pub fn model_path<S: AsRef<str>>(&self, names: &[S]) -> Result<ModelPath> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .ok_or_else(|| Error::Configuration(format!("unknown model type '{}'", name)))
            })
            .collect()
    }
}

/// Template resolvers known by name.
///
/// `placeholder` and `identity` are always registered.
#[derive(Debug, Clone)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<dyn PathTemplateResolver>>,
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        let mut registry = Self {
            resolvers: HashMap::new(),
        };
        registry.register(PlaceholderResolver).register(IdentityResolver);
        registry
    }
}

impl ResolverRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register a resolver under its own name.
    pub fn register<R: PathTemplateResolver + 'static>(&mut self, resolver: R) -> &mut Self {
        let resolver: Arc<dyn PathTemplateResolver> = Arc::new(resolver);
        self.resolvers.insert(resolver.name().to_string(), resolver);
        self
    }

    pub fn register_as(&mut self, name: impl Into<String>, resolver: Arc<dyn PathTemplateResolver>) -> &mut Self {
        self.resolvers.insert(name.into(), resolver);
        self
    }

    pub fn with<R: PathTemplateResolver + 'static>(mut self, resolver: R) -> Self {
        self.register(resolver);
        self
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn PathTemplateResolver>> {
        self.resolvers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Configuration(format!("unknown template resolver '{}'", name)))
    }
}
