//! Declarative resource manifest.
//!
//! A manifest describes root resources, their methods and sub-resource
//! locators, and the model types that reference each of them. It is the
//! data a discovery walk turns into descriptors.
//!
//! ```toml
//! application_path = "/api"
//! default_resolver = "placeholder"
//!
//! [[resources]]
//! name = "CustomersResource"
//! path = "customers"
//! referenced_by = ["Customer"]
//!
//! [[resources.methods]]
//! name = "orders"
//! path = "{customerId}/orders"
//! returns = "OrdersResource"
//! ```

use crate::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override manifest settings.
pub const ENV_PREFIX: &str = "HREFKIT_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Prefix joined in front of every root resource path.
    #[serde(default)]
    pub application_path: String,

    /// Resolver used where no resource or method names one.
    #[serde(default)]
    pub default_resolver: Option<String>,

    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

/// A resource type.
///
/// Types with a `path` are root resources; the rest are reachable only
/// through sub-resource locators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub name: String,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub referenced_by: Option<Vec<String>>,

    #[serde(default)]
    pub template_resolver: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// The abstract resource type this one implements.
    #[serde(default)]
    pub extends: Option<String>,

    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

/// A resource method (has `http_method`) or sub-resource locator (has
/// `path` and `returns`, no `http_method`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub http_method: Option<HttpMethod>,

    #[serde(default)]
    pub referenced_by: Option<Vec<String>>,

    #[serde(default)]
    pub template_resolver: Option<String>,

    /// Resource type returned by a sub-resource locator.
    #[serde(default)]
    pub returns: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl MethodEntry {
    pub fn is_resource_method(&self) -> bool { self.http_method.is_some() }

    pub fn is_locator(&self) -> bool { self.http_method.is_none() && self.path.is_some() }
}

impl Manifest {
    pub fn from_toml_str(s: &str) -> Result<Self> { Ok(toml::from_str(s)?) }

    /// Load a manifest file, with `HREFKIT_`-prefixed environment variables
    /// overriding its top-level settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("resource manifest {} not found", path.display()),
            )));
        }

        let manifest = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(manifest)
    }

    /// The resource named `name`.
    pub fn resource(&self, name: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    pub fn root_resources(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.resources.iter().filter(|resource| resource.path.is_some())
    }

    /// Concrete resource types that extend `name`.
    pub fn subtypes_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ResourceEntry> {
        self.resources
            .iter()
            .filter(move |resource| !resource.is_abstract && resource.extends.as_deref() == Some(name))
    }
}
