//! Resolve resource paths from the model types that reference them.
//!
//! Application code asks for "the resource reachable via `[Customer,
//! Order]`" and receives a path, without hard-coding paths in business
//! logic.
//!
//! # Architecture
//!
//! - `descriptor.rs` - Binding of a model path pattern to a path template
//! - `catalog.rs` - Two-phase descriptor catalog and best-match ranking
//! - `manifest.rs` - Declarative resource manifest (TOML, env overrides)
//! - `registry.rs` - Name lookup for model types and template resolvers
//! - `discovery.rs` - Walks a manifest and populates a catalog
//!
//! Model paths and glob matching live in `hrefkit-model`; template
//! filling lives in `hrefkit-template`. Both are re-exported here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hrefkit::{
//!     Catalog, ContextMap, ModelType, PlaceholderResolver, ResourceDescriptor, model_path,
//! };
//!
//! struct Customer;
//! struct Order;
//!
//! let mut builder = Catalog::builder();
//! builder.add_descriptor(
//!     ResourceDescriptor::method(
//!         "OrdersResource",
//!         "get",
//!         "/customers/{customerId}/orders/{orderId}",
//!         model_path![Customer, Order],
//!         Arc::new(PlaceholderResolver),
//!     )
//!     .unwrap(),
//! );
//! let catalog = builder.validate().unwrap();
//!
//! let context = ContextMap::new()
//!     .with_segment("customerId", 3)
//!     .with_segment("orderId", 14);
//! let path = catalog
//!     .resolve(&context, &[ModelType::of::<Customer>(), ModelType::of::<Order>()])
//!     .unwrap();
//! assert_eq!(path, "/customers/3/orders/14");
//! ```

pub use catalog::{Catalog, CatalogBuilder, ResourcePathResolver};
pub use descriptor::{ResourceDescriptor, ResourceKind};
pub use discovery::Discovery;
pub use error::{DuplicateGroup, Error, Result};
pub use manifest::{HttpMethod, Manifest, MethodEntry, ResourceEntry};
pub use registry::{ResolverRegistry, TypeRegistry};

pub use hrefkit_model::{
    AnyModel, AnyModelSequence, GlobMatcher, MatchType, ModelPath, ModelPathError, ModelType,
    model_path,
};
pub use hrefkit_template::{
    ContextError, ContextMap, FnResolver, IdentityResolver, PathTemplateContext,
    PathTemplateResolver, PlaceholderResolver, TemplateError,
};

mod catalog;
mod descriptor;
mod discovery;
mod error;
mod manifest;
mod registry;
