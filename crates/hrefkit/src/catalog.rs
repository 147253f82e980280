//! Descriptor catalog and best-match resolution.
//!
//! A catalog is built in two phases. [`CatalogBuilder`] accepts
//! descriptors during startup; [`CatalogBuilder::validate`] rejects
//! duplicate patterns and freezes the descriptors into a [`Catalog`], which
//! is read-only and can be shared freely between threads.
//!
//! # Ranking
//!
//! Given a query, every descriptor whose pattern glob-matches it is a
//! candidate. A single candidate wins outright. Otherwise a candidate whose
//! pattern equals the query wins; failing that, only the candidates with
//! the longest declared pattern survive, and positions are then compared
//! left to right, keeping at each position only the candidates with the
//! most specific match type (exact, then `?`, then `*`).

use crate::descriptor::ResourceDescriptor;
use crate::error::{DuplicateGroup, Error, Result};
use hrefkit_model::{ModelPath, ModelType};
use hrefkit_template::PathTemplateContext;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Resolves the path of the resource referenced by a sequence of model
/// types.
pub trait ResourcePathResolver {
    fn resolve(&self, context: &dyn PathTemplateContext, model_types: &[ModelType]) -> Result<String>;
}

impl<R: ResourcePathResolver + ?Sized> ResourcePathResolver for &R {
    fn resolve(&self, context: &dyn PathTemplateContext, model_types: &[ModelType]) -> Result<String> {
        (**self).resolve(context, model_types)
    }
}

impl<R: ResourcePathResolver + ?Sized> ResourcePathResolver for Arc<R> {
    fn resolve(&self, context: &dyn PathTemplateContext, model_types: &[ModelType]) -> Result<String> {
        (**self).resolve(context, model_types)
    }
}

/// Collects descriptors before the catalog is validated.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    descriptors: Vec<ResourceDescriptor>,
}

impl CatalogBuilder {
    pub fn new() -> Self { Self::default() }

    /// Register a descriptor.
    pub fn add_descriptor(&mut self, descriptor: ResourceDescriptor) -> &mut Self {
        debug!("{}", descriptor);
        self.descriptors.push(descriptor);
        self
    }

    /// Register a descriptor, builder style.
    pub fn descriptor(mut self, descriptor: ResourceDescriptor) -> Self {
        self.add_descriptor(descriptor);
        self
    }

    pub fn descriptors(&self) -> &[ResourceDescriptor] { &self.descriptors }

    pub fn len(&self) -> usize { self.descriptors.len() }

    pub fn is_empty(&self) -> bool { self.descriptors.is_empty() }

    /// Close configuration.
    ///
    /// Fails with [`Error::DuplicatePattern`] if two descriptors have equal
    /// patterns once wildcards of either kind are normalized to one marker.
    pub fn validate(self) -> Result<Catalog> {
        let duplicates = find_duplicates(&self.descriptors);
        if !duplicates.is_empty() {
            for descriptor in duplicates.iter().flat_map(|group| &group.descriptors) {
                error!("DUPLICATE: {}", descriptor);
            }
            return Err(Error::DuplicatePattern { duplicates });
        }

        for descriptor in &self.descriptors {
            info!("mapping {}", descriptor);
        }
        Ok(Catalog {
            descriptors: self.descriptors.into(),
        })
    }
}

/// Group descriptors by normalized pattern, keeping groups of two or more
/// in registration order.
fn find_duplicates(descriptors: &[ResourceDescriptor]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut by_pattern: HashMap<ModelPath, usize> = HashMap::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let pattern = descriptor.referenced_by().normalized();
        match by_pattern.get(&pattern) {
            Some(&index) => groups[index].descriptors.push(descriptor.clone()),
            None => {
                by_pattern.insert(pattern.clone(), groups.len());
                groups.push(DuplicateGroup {
                    pattern,
                    descriptors: vec![descriptor.clone()],
                });
            }
        }
    }

    groups.retain(|group| group.descriptors.len() > 1);
    groups
}

/// A validated, immutable set of descriptors.
///
/// Cloning is cheap; clones share the descriptors.
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: Arc<[ResourceDescriptor]>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder { CatalogBuilder::new() }

    pub fn descriptors(&self) -> &[ResourceDescriptor] { &self.descriptors }

    pub fn len(&self) -> usize { self.descriptors.len() }

    pub fn is_empty(&self) -> bool { self.descriptors.is_empty() }

    /// Resolve the path of the resource referenced by `model_types`.
    ///
    /// Template resolver failures are returned unchanged as
    /// [`Error::Template`].
    pub fn resolve(&self, context: &dyn PathTemplateContext, model_types: &[ModelType]) -> Result<String> {
        self.resolve_path(context, &ModelPath::from(model_types))
    }

    pub fn resolve_path(&self, context: &dyn PathTemplateContext, model_path: &ModelPath) -> Result<String> {
        let descriptor = self.find_best_match(model_path)?;
        Ok(descriptor.template_resolver().resolve(descriptor.path(), context)?)
    }

    /// Find the single descriptor that best matches `model_path`.
    pub fn find_best_match(&self, model_path: &ModelPath) -> Result<&ResourceDescriptor> {
        let mut matches = self.find_all_matches(model_path);

        match matches.as_slice() {
            [] => {
                return Err(Error::ResourceNotFound {
                    model_path: model_path.clone(),
                });
            }
            [descriptor] => {
                trace!("{} has singular match {}", model_path, descriptor);
                return Ok(*descriptor);
            }
            _ => {}
        }

        if let Some(descriptor) = find_exact_match(model_path, &matches)? {
            trace!("{} has exact match {}", model_path, descriptor);
            return Ok(descriptor);
        }

        matches = find_longest_matches(model_path, matches);
        let length = matches.first().map_or(0, |d| d.referenced_by().len());
        let mut step = 0;
        while step < length && matches.len() > 1 {
            matches = find_best_matches_at_step(step, model_path, matches)?;
            step += 1;
        }

        match matches.as_slice() {
            [descriptor] => Ok(*descriptor),
            _ => Err(ambiguous(model_path, &matches)),
        }
    }

    fn find_all_matches(&self, model_path: &ModelPath) -> Vec<&ResourceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.matches(model_path.as_slice()))
            .inspect(|descriptor| trace!("{} matches {}", model_path, descriptor))
            .collect()
    }
}

impl ResourcePathResolver for Catalog {
    fn resolve(&self, context: &dyn PathTemplateContext, model_types: &[ModelType]) -> Result<String> {
        Catalog::resolve(self, context, model_types)
    }
}

fn ambiguous(model_path: &ModelPath, matches: &[&ResourceDescriptor]) -> Error {
    Error::AmbiguousMatch {
        model_path: model_path.clone(),
        candidates: matches.iter().map(|&d| d.clone()).collect(),
    }
}

/// The candidate whose pattern equals the query, if there is exactly one.
fn find_exact_match<'a>(
    model_path: &ModelPath,
    matches: &[&'a ResourceDescriptor],
) -> Result<Option<&'a ResourceDescriptor>> {
    let exact: Vec<&'a ResourceDescriptor> = matches
        .iter()
        .copied()
        .filter(|descriptor| descriptor.referenced_by() == model_path)
        .collect();

    match exact.as_slice() {
        [] => Ok(None),
        [descriptor] => Ok(Some(*descriptor)),
        _ => Err(ambiguous(model_path, &exact)),
    }
}

/// The candidates with the greatest declared pattern length.
fn find_longest_matches<'a>(
    model_path: &ModelPath,
    matches: Vec<&'a ResourceDescriptor>,
) -> Vec<&'a ResourceDescriptor> {
    let longest = matches
        .iter()
        .map(|descriptor| descriptor.referenced_by().len())
        .max()
        .unwrap_or(0);

    matches
        .into_iter()
        .filter(|descriptor| descriptor.referenced_by().len() == longest)
        .inspect(|descriptor| trace!("{} has longest match {}", model_path, descriptor))
        .collect()
}

/// The candidates with the most specific match type at `step`.
fn find_best_matches_at_step<'a>(
    step: usize,
    model_path: &ModelPath,
    matches: Vec<&'a ResourceDescriptor>,
) -> Result<Vec<&'a ResourceDescriptor>> {
    let match_types = matches
        .iter()
        .map(|descriptor| descriptor.referenced_by().match_type_at(step))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let Some(best) = match_types.iter().min().copied() else {
        return Ok(matches);
    };

    Ok(matches
        .into_iter()
        .zip(match_types)
        .filter(|&(_, match_type)| match_type == best)
        .map(|(descriptor, _)| descriptor)
        .inspect(|descriptor| trace!("at step {}: {} has best match {}", step, model_path, descriptor))
        .collect())
}
