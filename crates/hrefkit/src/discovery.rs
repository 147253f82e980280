//! Populate a catalog from a resource manifest.
//!
//! The walk starts at every root resource, joins its path under the
//! application path, and follows resource methods and sub-resource
//! locators depth first. Each referenced resource becomes a descriptor
//! whose model path is the chain of `referenced_by` types seen on the way
//! down.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::descriptor::{ResourceDescriptor, ResourceKind};
use crate::error::{Error, Result};
use crate::manifest::{Manifest, MethodEntry, ResourceEntry};
use crate::registry::{ResolverRegistry, TypeRegistry};
use hrefkit_model::ModelPath;
use hrefkit_template::PathTemplateResolver;
use std::sync::Arc;
use tracing::{debug, trace};

type SharedResolver = Arc<dyn PathTemplateResolver>;

/// Turns a [`Manifest`] into descriptors, looking names up in the given
/// registries.
#[derive(Debug, Clone, Copy)]
pub struct Discovery<'a> {
    types:     &'a TypeRegistry,
    resolvers: &'a ResolverRegistry,
}

impl<'a> Discovery<'a> {
    pub fn new(types: &'a TypeRegistry, resolvers: &'a ResolverRegistry) -> Self { Self { types, resolvers } }

    /// Walk `manifest` and return the validated catalog.
    pub fn discover(&self, manifest: &Manifest) -> Result<Catalog> {
        debug!("discovering resources under '{}'", manifest.application_path);
        let mut builder = CatalogBuilder::new();
        self.populate(manifest, &mut builder)?;
        let catalog = builder.validate()?;
        debug!("discovered {} resource descriptors", catalog.len());
        Ok(catalog)
    }

    /// Walk `manifest`, adding descriptors to an open builder.
    pub fn populate(&self, manifest: &Manifest, builder: &mut CatalogBuilder) -> Result<()> {
        let default_resolver = manifest
            .default_resolver
            .as_deref()
            .map(|name| self.resolvers.get(name))
            .transpose()?;

        let mut walk = Walk {
            discovery: self,
            manifest,
            builder,
            stack: Vec::new(),
        };
        for root in manifest.root_resources() {
            walk.root(root, default_resolver.as_ref())?;
        }
        Ok(())
    }

    /// `name` if given, otherwise the inherited resolver.
    fn resolver(&self, name: Option<&str>, inherited: Option<&SharedResolver>) -> Result<Option<SharedResolver>> {
        match name {
            Some(name) => self.resolvers.get(name).map(Some),
            None => Ok(inherited.cloned()),
        }
    }
}

struct Walk<'d, 'm, 'b> {
    discovery: &'d Discovery<'d>,
    manifest:  &'m Manifest,
    builder:   &'b mut CatalogBuilder,
    stack:     Vec<&'m str>,
}

impl<'m> Walk<'_, 'm, '_> {
    fn root(&mut self, root: &'m ResourceEntry, inherited: Option<&SharedResolver>) -> Result<()> {
        if root.is_abstract {
            return Err(Error::Configuration(format!(
                "root resource '{}' must not be abstract",
                root.name
            )));
        }
        let Some(refs) = &root.referenced_by else {
            trace!("skipping root resource {} with no referenced_by", root.name);
            return Ok(());
        };

        let path = join_path(&self.manifest.application_path, root.path.as_deref().unwrap_or_default());
        let resolver = self.discovery.resolver(root.template_resolver.as_deref(), inherited)?;
        let model_path = self.discovery.types.model_path(refs)?;

        let kind = ResourceKind::Type {
            name: root.name.clone(),
        };
        self.add(kind, &path, model_path.clone(), resolver.clone())?;
        self.methods(root, &path, &model_path, resolver.as_ref())
    }

    fn methods(
        &mut self,
        resource: &'m ResourceEntry,
        path: &str,
        model_path: &ModelPath,
        inherited: Option<&SharedResolver>,
    ) -> Result<()> {
        if self.stack.contains(&resource.name.as_str()) {
            return Err(Error::Configuration(format!(
                "sub-resource locators form a cycle: {} -> {}",
                self.stack.join(" -> "),
                resource.name
            )));
        }
        self.stack.push(&resource.name);

        for method in &resource.methods {
            if method.path.is_none() && method.http_method.is_none() {
                trace!("ignoring {}.{}: neither path nor http_method", resource.name, method.name);
                continue;
            }

            let method_path = join_path(path, method.path.as_deref().unwrap_or_default());
            if method.is_resource_method() {
                self.resource_method(resource, method, &method_path, model_path, inherited)?;
            } else {
                self.locator(resource, method, &method_path, model_path, inherited)?;
            }
        }

        self.stack.pop();
        Ok(())
    }

    fn resource_method(
        &mut self,
        resource: &ResourceEntry,
        method: &MethodEntry,
        path: &str,
        model_path: &ModelPath,
        inherited: Option<&SharedResolver>,
    ) -> Result<()> {
        let Some(refs) = &method.referenced_by else {
            trace!("ignoring {}.{}: no referenced_by", resource.name, method.name);
            return Ok(());
        };

        let resolver = self.discovery.resolver(method.template_resolver.as_deref(), inherited)?;
        let model_path = model_path.concat(&self.discovery.types.model_path(refs)?);
        let kind = ResourceKind::Method {
            resource: resource.name.clone(),
            method:   method.name.clone(),
        };
        self.add(kind, path, model_path, resolver)
    }

    fn locator(
        &mut self,
        resource: &ResourceEntry,
        method: &MethodEntry,
        path: &str,
        model_path: &ModelPath,
        inherited: Option<&SharedResolver>,
    ) -> Result<()> {
        let returned = self.returned_resource(resource, method)?;

        let refs = match (&method.referenced_by, &returned.referenced_by) {
            (Some(own), Some(theirs)) if own != theirs => {
                return Err(Error::Configuration(format!(
                    "locator {}.{} is referenced by {:?} but returns {} referenced by {:?}",
                    resource.name, method.name, own, returned.name, theirs
                )));
            }
            (own, theirs) => own.as_ref().or(theirs.as_ref()),
        };

        let returned_resolver = self.discovery.resolver(returned.template_resolver.as_deref(), inherited)?;
        let resolver = self
            .discovery
            .resolver(method.template_resolver.as_deref(), returned_resolver.as_ref())?;

        let model_path = match refs {
            Some(refs) => {
                let model_path = model_path.concat(&self.discovery.types.model_path(refs)?);
                let kind = if method.referenced_by.is_some() {
                    ResourceKind::Method {
                        resource: resource.name.clone(),
                        method:   method.name.clone(),
                    }
                } else {
                    ResourceKind::Type {
                        name: returned.name.clone(),
                    }
                };
                self.add(kind, path, model_path.clone(), resolver.clone())?;
                model_path
            }
            None => {
                trace!("locator {}.{} adds no descriptor", resource.name, method.name);
                model_path.clone()
            }
        };

        self.methods(returned, path, &model_path, resolver.as_ref())
    }

    /// The concrete resource a locator returns.
    ///
    /// An abstract return type stands for its single subtype with the same
    /// `referenced_by` as the locator.
    fn returned_resource(&self, resource: &ResourceEntry, method: &MethodEntry) -> Result<&'m ResourceEntry> {
        let locator = || format!("{}.{}", resource.name, method.name);

        let name = method
            .returns
            .as_deref()
            .ok_or_else(|| Error::Configuration(format!("locator {} does not declare returns", locator())))?;
        let returned = self.manifest.resource(name).ok_or_else(|| {
            Error::Configuration(format!("locator {} returns unknown resource '{}'", locator(), name))
        })?;
        if !returned.is_abstract {
            return Ok(returned);
        }

        let Some(refs) = &method.referenced_by else {
            return Err(Error::Configuration(format!(
                "locator {} returns abstract resource '{}' and must declare referenced_by",
                locator(),
                name
            )));
        };
        let subtypes: Vec<&'m ResourceEntry> = self
            .manifest
            .subtypes_of(name)
            .filter(|subtype| subtype.referenced_by.as_ref() == Some(refs))
            .collect();

        match subtypes.as_slice() {
            [subtype] => {
                trace!("locator {} returns {} for abstract {}", locator(), subtype.name, name);
                Ok(*subtype)
            }
            [] => Err(Error::Configuration(format!(
                "no subtype of '{}' is referenced by {:?} for locator {}",
                name,
                refs,
                locator()
            ))),
            _ => Err(Error::Configuration(format!(
                "{} subtypes of '{}' are referenced by {:?} for locator {}",
                subtypes.len(),
                name,
                refs,
                locator()
            ))),
        }
    }

    fn add(
        &mut self,
        kind: ResourceKind,
        path: &str,
        model_path: ModelPath,
        resolver: Option<SharedResolver>,
    ) -> Result<()> {
        let resolver = resolver.ok_or_else(|| {
            Error::Configuration(format!(
                "{} has no template_resolver and the manifest has no default_resolver",
                kind
            ))
        })?;
        trace!("discovered {} at {}", kind, path);
        self.builder
            .add_descriptor(ResourceDescriptor::new(kind, path, model_path, resolver)?);
        Ok(())
    }
}

/// Join path segments with single `/` separators.
fn join_path(parent: &str, child: &str) -> String {
    let segments: Vec<&str> = parent
        .split('/')
        .chain(child.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}
