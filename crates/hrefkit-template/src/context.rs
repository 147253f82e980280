//! Objects available to a template resolver.

use crate::error::ContextError;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt::Display;

/// A bag of objects consulted while filling a path template.
///
/// The trait is object safe; use the typed helpers on
/// `dyn PathTemplateContext` to fetch values.
pub trait PathTemplateContext {
    /// The value registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<&(dyn Any + Send + Sync)>;

    /// Every value whose concrete type is `type_id`.
    fn lookup_type(&self, type_id: TypeId) -> Vec<&(dyn Any + Send + Sync)>;
}

impl dyn PathTemplateContext + '_ {
    /// The single value of type `T`.
    pub fn get<T: Any>(&self) -> Result<&T, ContextError> {
        let missing = ContextError::Missing {
            type_name: type_name::<T>(),
        };
        let mut found = self.lookup_type(TypeId::of::<T>()).into_iter();
        let first = found.next().ok_or_else(|| missing.clone())?;
        if found.next().is_some() {
            return Err(ContextError::NotUnique {
                type_name: type_name::<T>(),
            });
        }
        first.downcast_ref::<T>().ok_or(missing)
    }

    /// The value named `name`, which must be of type `T`.
    pub fn get_named<T: Any>(&self, name: &str) -> Result<&T, ContextError> {
        let value = self.lookup(name).ok_or_else(|| ContextError::MissingNamed {
            name: name.to_string(),
        })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| ContextError::TypeMismatch {
                name:     name.to_string(),
                expected: type_name::<T>(),
            })
    }
}

/// A [`PathTemplateContext`] backed by owned values.
///
/// Named values are also visible to typed lookup.
#[derive(Default)]
pub struct ContextMap {
    values: Vec<Box<dyn Any + Send + Sync>>,
    names:  HashMap<String, usize>,
}

impl ContextMap {
    pub fn new() -> Self { Self::default() }

    /// Add an unnamed value.
    pub fn put<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.values.push(Box::new(value));
        self
    }

    /// Add a value under `name`, replacing any previous binding of the name.
    pub fn put_named<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        let name = name.into();
        match self.names.get(&name) {
            Some(&index) => self.values[index] = Box::new(value),
            None => {
                self.values.push(Box::new(value));
                self.names.insert(name, self.values.len() - 1);
            }
        }
        self
    }

    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.put(value);
        self
    }

    pub fn with_named<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.put_named(name, value);
        self
    }

    /// Add the rendered form of `value` as a named path segment.
    pub fn with_segment(self, name: impl Into<String>, value: impl Display) -> Self {
        self.with_named(name, value.to_string())
    }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl PathTemplateContext for ContextMap {
    fn lookup(&self, name: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.names.get(name).map(|&index| &*self.values[index])
    }

    fn lookup_type(&self, type_id: TypeId) -> Vec<&(dyn Any + Send + Sync)> {
        self.values
            .iter()
            .map(|value| &**value)
            .filter(|value| (**value).type_id() == type_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Customer {
        id: u32,
    }

    #[derive(Debug, PartialEq)]
    struct Order {
        id: u32,
    }

    fn as_context(map: &ContextMap) -> &dyn PathTemplateContext { map }

    #[test]
    fn test_get_by_type() {
        let map = ContextMap::new().with(Customer { id: 1 }).with(Order { id: 2 });
        let ctx = as_context(&map);
        assert_eq!(ctx.get::<Customer>().unwrap(), &Customer { id: 1 });
        assert_eq!(ctx.get::<Order>().unwrap().id, 2);
    }

    #[test]
    fn test_get_by_type_missing() {
        let map = ContextMap::new().with(Customer { id: 1 });
        let err = as_context(&map).get::<Order>().unwrap_err();
        assert!(matches!(err, ContextError::Missing { .. }));
    }

    #[test]
    fn test_get_by_type_not_unique() {
        let map = ContextMap::new().with(Customer { id: 1 }).with(Customer { id: 2 });
        let err = as_context(&map).get::<Customer>().unwrap_err();
        assert!(matches!(err, ContextError::NotUnique { .. }));
    }

    #[test]
    fn test_named_values_visible_by_type() {
        let map = ContextMap::new().with_named("owner", Customer { id: 9 });
        let ctx = as_context(&map);
        assert_eq!(ctx.get::<Customer>().unwrap().id, 9);
        assert_eq!(ctx.get_named::<Customer>("owner").unwrap().id, 9);
    }

    #[test]
    fn test_get_named_errors() {
        let map = ContextMap::new().with_named("owner", Customer { id: 9 });
        let ctx = as_context(&map);
        assert_eq!(
            ctx.get_named::<Customer>("buyer").unwrap_err(),
            ContextError::MissingNamed {
                name: "buyer".to_string()
            }
        );
        assert!(matches!(
            ctx.get_named::<Order>("owner").unwrap_err(),
            ContextError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_put_named_replaces_binding() {
        let mut map = ContextMap::new();
        map.put_named("id", 1u32).put_named("id", 2u32);
        assert_eq!(map.len(), 1);
        assert_eq!(as_context(&map).get_named::<u32>("id").unwrap(), &2);
    }

    #[test]
    fn test_with_segment_renders_display() {
        let map = ContextMap::new().with_segment("orderId", 42);
        assert_eq!(as_context(&map).get_named::<String>("orderId").unwrap(), "42");
    }
}
