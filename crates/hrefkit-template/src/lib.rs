//! Path template resolution for hrefkit.
//!
//! # Architecture
//!
//! Template filling is a mechanism the resource catalog hands off to once a
//! descriptor has been chosen. The catalog never looks inside a template.
//!
//! - [`PathTemplateContext`] carries the objects a resolver may consult
//! - [`PathTemplateResolver`] turns a template plus a context into a path
//!
//! # Example
//!
//! ```
//! use hrefkit_template::{ContextMap, PathTemplateResolver, PlaceholderResolver};
//!
//! let context = ContextMap::new()
//!     .with_segment("customerId", 17)
//!     .with_segment("orderId", "A-42");
//! let path = PlaceholderResolver
//!     .resolve("/customers/{customerId}/orders/{orderId: [A-Z0-9-]+}", &context)
//!     .unwrap();
//! assert_eq!(path, "/customers/17/orders/A-42");
//! ```

pub use context::{ContextMap, PathTemplateContext};
pub use error::{ContextError, TemplateError};
pub use resolver::{FnResolver, IdentityResolver, PathTemplateResolver, PlaceholderResolver};

mod context;
mod error;
mod resolver;
