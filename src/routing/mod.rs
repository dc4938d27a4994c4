//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation:
//!     authored Element tree
//!     → normalizer.rs (classify, unwrap proxies, resolve children)
//!     → descriptor.rs (RouteNode tree, ordered or named children)
//!     → handed to the router runtime, immutable from then on
//!
//! Render (inside the runtime, per match):
//!     RouteNode::render(ctx)
//!     → Display(component) | Passthrough
//!     → redirect.rs: format `to` via format.rs → Redirect(signal)
//! ```
//!
//! # Design Decisions
//! - Compilation is a pure function of the input tree
//! - No path matching or navigation happens here
//! - Deterministic: same tree always yields an equal config

pub mod descriptor;
pub mod format;
pub mod normalizer;
pub mod outlets;
pub mod redirect;

pub use descriptor::{walk, ChildRoutes, RenderOutcome, RouteDescriptor, RouteNode};
pub use format::{FormatError, Params, PathFormatter, RenderContext, TemplateFormatter};
pub use normalizer::{build_config, ElementKind, Normalizer, RouteSource, RouteTypes};
pub use outlets::OutletMap;
pub use redirect::{RedirectDescriptor, RedirectError, RedirectSignal};
