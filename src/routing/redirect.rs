//! Redirect routes.
//!
//! # Render Contract
//! ```text
//! render(ctx)
//!     → ctx.format(to)             (formatter error → returned unchanged)
//!     → RedirectSignal { location }
//! ```
//!
//! # Design Decisions
//! - Rendering returns the signal as a value instead of unwinding
//! - The runtime tells a redirect apart from a failure by type, never by message
//! - `to` is always given explicitly, never inherited from a base route

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::element::Props;
use crate::routing::descriptor::RouteDescriptor;
use crate::routing::format::{PathFormatter, RenderContext};

/// Construction failures for [`RedirectDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    #[error("redirect requires a non-empty `{0}`")]
    MissingProp(&'static str),
}

/// "Go here instead". Carries a fully resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSignal {
    pub location: String,
}

impl fmt::Display for RedirectSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

/// A route that always redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectDescriptor {
    path: String,
    to: String,
}

impl RedirectDescriptor {
    /// Build from `from` (the route path) and `to` (the target template).
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, RedirectError> {
        let path = non_empty(from.into(), "from")?;
        let to = non_empty(to.into(), "to")?;
        Ok(Self { path, to })
    }

    /// Build from authored `from`/`to` props. Non-text values count as missing.
    pub fn from_props(props: &Props) -> Result<Self, RedirectError> {
        let from = props.text("from").ok_or(RedirectError::MissingProp("from"))?;
        let to = props.text("to").ok_or(RedirectError::MissingProp("to"))?;
        Self::new(from, to)
    }

    /// Build on top of an existing route, taking its path as `from`.
    pub fn from_route(base: &RouteDescriptor, to: impl Into<String>) -> Result<Self, RedirectError> {
        let from = base.path.clone().ok_or(RedirectError::MissingProp("from"))?;
        Self::new(from, to)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Resolve `to` against the current match.
    pub fn render<F: PathFormatter>(
        &self,
        ctx: &RenderContext<'_, F>,
    ) -> Result<RedirectSignal, F::Error> {
        let location = ctx.format(&self.to)?;
        tracing::trace!(from = %self.path, location = %location, "Redirect rendered");
        Ok(RedirectSignal { location })
    }
}

fn non_empty(value: String, prop: &'static str) -> Result<String, RedirectError> {
    if value.is_empty() {
        Err(RedirectError::MissingProp(prop))
    } else {
        Ok(value)
    }
}
