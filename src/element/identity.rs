//! Element type identities and proxy unwrapping.
//!
//! # Responsibilities
//! - Name the identity of an authored element's type
//! - See through proxy wrappers (hot-reload stand-ins) to the real type
//!
//! # Design Decisions
//! - Identities are compared only after unwrapping both sides
//! - Unwrapping is bounded; an over-long chain resolves to nothing
//! - A plain identity is its own fixed point

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// A stable type identity, e.g. `Route` or `Redirect`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A value that may stand in for another type.
pub trait Unwrappable: Send + Sync + fmt::Debug {
    /// Returns the type this value stands in for, one layer down.
    fn resolve(&self) -> ElementType;
}

impl Unwrappable for TypeKey {
    fn resolve(&self) -> ElementType {
        ElementType::Key(self.clone())
    }
}

/// The `type` of an authored element.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "TypeRepr")]
pub enum ElementType {
    /// A concrete identity.
    Key(TypeKey),
    /// An indirection that must be unwrapped before classification.
    Wrapped(Arc<dyn Unwrappable>),
}

impl ElementType {
    /// Wrap `target` in one proxy layer.
    pub fn proxied(target: impl Into<ElementType>) -> Self {
        ElementType::Wrapped(Arc::new(Proxy::new(target)))
    }

    /// Unwrap to a fixed point, following at most `max_depth` wrappers.
    ///
    /// Returns `None` when the chain is longer than `max_depth`.
    pub fn resolve(&self, max_depth: usize) -> Option<TypeKey> {
        let mut current = self.clone();
        for _ in 0..=max_depth {
            match current {
                ElementType::Key(key) => return Some(key),
                ElementType::Wrapped(inner) => current = inner.resolve(),
            }
        }
        None
    }

    /// True when both sides unwrap to the same identity.
    pub fn same_identity(&self, other: &ElementType, max_depth: usize) -> bool {
        match (self.resolve(max_depth), other.resolve(max_depth)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<TypeKey> for ElementType {
    fn from(key: TypeKey) -> Self {
        ElementType::Key(key)
    }
}

impl From<&str> for ElementType {
    fn from(name: &str) -> Self {
        ElementType::Key(TypeKey::new(name))
    }
}

impl From<String> for ElementType {
    fn from(name: String) -> Self {
        ElementType::Key(TypeKey::from(name))
    }
}

/// Hot-reload style stand-in for another element type.
#[derive(Debug, Clone)]
pub struct Proxy {
    target: ElementType,
}

impl Proxy {
    pub fn new(target: impl Into<ElementType>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Unwrappable for Proxy {
    fn resolve(&self) -> ElementType {
        self.target.clone()
    }
}

/// On-disk form: `"Route"` or `{ "proxy": <type> }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Key(String),
    Proxy { proxy: Box<TypeRepr> },
}

impl From<TypeRepr> for ElementType {
    fn from(repr: TypeRepr) -> Self {
        let mut depth = 0;
        let mut current = repr;
        let key = loop {
            match current {
                TypeRepr::Key(name) => break TypeKey::from(name),
                TypeRepr::Proxy { proxy } => {
                    depth += 1;
                    current = *proxy;
                }
            }
        };
        let mut ty = ElementType::Key(key);
        for _ in 0..depth {
            ty = ElementType::proxied(ty);
        }
        ty
    }
}
