//! Authored tree → route descriptors.
//!
//! # Responsibilities
//! - Classify each element by its unwrapped type identity
//! - Build a descriptor per Route / Redirect element
//! - Resolve children into an ordered list or named outlets
//!
//! # Design Decisions
//! - Recognized identities are handed in explicitly (no global registry)
//! - Unrecognized elements are skipped silently, never an error
//! - Fragments are transparent: their children are spliced in place
//! - Explicit work stack instead of recursion, so depth is unbounded
//! - Redirect construction errors abort the whole build, unwrapped

use crate::config::schema::{AppConfig, TypesConfig};
use crate::element::{Children, Element, ElementType, TypeKey};
use crate::routing::descriptor::{ChildRoutes, RouteDescriptor, RouteNode};
use crate::routing::outlets::OutletMap;
use crate::routing::redirect::{RedirectDescriptor, RedirectError};

/// Default bound on proxy wrapper layers.
pub const DEFAULT_MAX_PROXY_DEPTH: usize = 32;

/// The type identities the normalizer recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTypes {
    pub route: TypeKey,
    pub redirect: TypeKey,
    /// Pass-through grouping element, if any.
    pub fragment: Option<TypeKey>,
}

impl Default for RouteTypes {
    fn default() -> Self {
        Self {
            route: TypeKey::new("Route"),
            redirect: TypeKey::new("Redirect"),
            fragment: Some(TypeKey::new("Fragment")),
        }
    }
}

impl From<&TypesConfig> for RouteTypes {
    fn from(config: &TypesConfig) -> Self {
        Self {
            route: TypeKey::new(config.route.as_str()),
            redirect: TypeKey::new(config.redirect.as_str()),
            fragment: config.fragment.as_deref().map(TypeKey::new),
        }
    }
}

/// Classification of an authored element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Route,
    Redirect,
    Fragment,
    Other,
}

/// Input to [`Normalizer::build_config`]: one element or a top-level list.
#[derive(Debug, Clone, Copy)]
pub enum RouteSource<'a> {
    Single(&'a Element),
    Many(&'a [Element]),
}

impl<'a> RouteSource<'a> {
    fn elements(self) -> &'a [Element] {
        match self {
            RouteSource::Single(element) => std::slice::from_ref(element),
            RouteSource::Many(elements) => elements,
        }
    }
}

impl<'a> From<&'a Element> for RouteSource<'a> {
    fn from(element: &'a Element) -> Self {
        RouteSource::Single(element)
    }
}

impl<'a> From<&'a [Element]> for RouteSource<'a> {
    fn from(elements: &'a [Element]) -> Self {
        RouteSource::Many(elements)
    }
}

impl<'a> From<&'a Vec<Element>> for RouteSource<'a> {
    fn from(elements: &'a Vec<Element>) -> Self {
        RouteSource::Many(elements.as_slice())
    }
}

/// Turns authored element trees into route descriptors.
#[derive(Debug, Clone)]
pub struct Normalizer {
    types: RouteTypes,
    max_proxy_depth: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(RouteTypes::default())
    }
}

impl Normalizer {
    pub fn new(types: RouteTypes) -> Self {
        Self {
            types,
            max_proxy_depth: DEFAULT_MAX_PROXY_DEPTH,
        }
    }

    pub fn with_max_proxy_depth(mut self, max_proxy_depth: usize) -> Self {
        self.max_proxy_depth = max_proxy_depth;
        self
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(RouteTypes::from(&config.types))
            .with_max_proxy_depth(config.normalizer.max_proxy_depth)
    }

    /// Classify an element type after unwrapping any proxies.
    ///
    /// At most `max_proxy_depth` wrapper layers are unwrapped. A longer
    /// chain, or a cycle, classifies as [`ElementKind::Other`] with a warning,
    /// so the element is skipped rather than failing the build. Raise
    /// `normalizer.max_proxy_depth` for hot-reload setups that stack more
    /// wrappers than the default.
    pub fn classify(&self, ty: &ElementType) -> ElementKind {
        let Some(key) = ty.resolve(self.max_proxy_depth) else {
            tracing::warn!(
                max_proxy_depth = self.max_proxy_depth,
                "Proxy chain too deep, treating element as non-route"
            );
            return ElementKind::Other;
        };

        if key == self.types.route {
            ElementKind::Route
        } else if key == self.types.redirect {
            ElementKind::Redirect
        } else if self.types.fragment.as_ref() == Some(&key) {
            ElementKind::Fragment
        } else {
            ElementKind::Other
        }
    }

    /// Build the route config for `root`.
    ///
    /// Returns one descriptor per recognized top-level element, in order.
    pub fn build_config<'a>(
        &self,
        root: impl Into<RouteSource<'a>>,
    ) -> Result<Vec<RouteNode>, RedirectError> {
        let source: RouteSource<'a> = root.into();
        let mut root_frame = Frame::root();
        for element in source.elements().iter().rev() {
            root_frame.pending.push(Pending {
                outlet: None,
                element,
            });
        }

        let mut stack = vec![root_frame];
        let mut built = 0usize;
        let mut skipped = 0usize;

        while let Some(frame) = stack.last_mut() {
            if let Some(Pending { outlet, element }) = frame.pending.pop() {
                match self.classify(&element.ty) {
                    ElementKind::Route => stack.push(Frame::route(outlet, element)),
                    ElementKind::Redirect => {
                        let redirect = RedirectDescriptor::from_props(&element.props)?;
                        if !element.children.is_empty() {
                            tracing::debug!(
                                from = redirect.path(),
                                "Ignoring children of redirect"
                            );
                        }
                        frame.collect(outlet, RouteNode::Redirect(redirect));
                        built += 1;
                    }
                    ElementKind::Fragment => match element.children.as_ordered() {
                        Some(children) => frame.schedule(outlet, children),
                        None => {
                            tracing::debug!("Fragment with named children contributes no routes");
                            skipped += 1;
                        }
                    },
                    ElementKind::Other => {
                        tracing::trace!(ty = ?element.ty, "Skipping non-route element");
                        skipped += 1;
                    }
                }
                continue;
            }

            let Some(finished) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some(parent) => {
                    if let Some((outlet, node)) = finished.into_node() {
                        parent.collect(outlet, node);
                        built += 1;
                    }
                }
                None => {
                    let routes = finished.collected.into_routes();
                    tracing::debug!(
                        top_level = routes.len(),
                        descriptors = built,
                        skipped,
                        "Route config built"
                    );
                    return Ok(routes);
                }
            }
        }

        Ok(Vec::new())
    }
}

/// Build with the default recognized types.
pub fn build_config<'a>(
    root: impl Into<RouteSource<'a>>,
) -> Result<Vec<RouteNode>, RedirectError> {
    Normalizer::default().build_config(root)
}

struct Pending<'a> {
    outlet: Option<&'a str>,
    element: &'a Element,
}

enum Collected {
    Ordered(Vec<RouteNode>),
    Named(OutletMap<Vec<RouteNode>>),
}

impl Collected {
    fn into_children(self) -> Option<ChildRoutes> {
        match self {
            Collected::Ordered(nodes) if nodes.is_empty() => None,
            Collected::Ordered(nodes) => Some(ChildRoutes::Ordered(nodes)),
            Collected::Named(outlets) if outlets.is_empty() => None,
            Collected::Named(outlets) => Some(ChildRoutes::Named(outlets)),
        }
    }

    fn into_routes(self) -> Vec<RouteNode> {
        match self {
            Collected::Ordered(nodes) => nodes,
            Collected::Named(outlets) => outlets.into_values().flatten().collect(),
        }
    }
}

/// One element being built, with its not-yet-visited children.
struct Frame<'a> {
    outlet: Option<&'a str>,
    route: Option<RouteDescriptor>,
    pending: Vec<Pending<'a>>,
    collected: Collected,
}

impl<'a> Frame<'a> {
    fn root() -> Self {
        Self {
            outlet: None,
            route: None,
            pending: Vec::new(),
            collected: Collected::Ordered(Vec::new()),
        }
    }

    fn route(outlet: Option<&'a str>, element: &'a Element) -> Self {
        let route = RouteDescriptor::new(
            element.props.path().map(str::to_string),
            element.props.component(),
        );
        let mut frame = Self {
            outlet,
            route: Some(route),
            pending: Vec::new(),
            collected: Collected::Ordered(Vec::new()),
        };

        match &element.children {
            Children::Named(outlets) => {
                frame.collected = Collected::Named(OutletMap::new());
                for (name, slot) in outlets.iter().rev() {
                    for child in slot.as_slice().iter().rev() {
                        frame.pending.push(Pending {
                            outlet: Some(name),
                            element: child,
                        });
                    }
                }
            }
            children => {
                if let Some(ordered) = children.as_ordered() {
                    frame.schedule(None, ordered);
                }
            }
        }
        frame
    }

    /// Queue `children` to be visited next, in order.
    fn schedule(&mut self, outlet: Option<&'a str>, children: &'a [Element]) {
        for element in children.iter().rev() {
            self.pending.push(Pending { outlet, element });
        }
    }

    fn collect(&mut self, outlet: Option<&str>, node: RouteNode) {
        match &mut self.collected {
            Collected::Ordered(nodes) => nodes.push(node),
            Collected::Named(outlets) => match outlet {
                Some(name) => outlets.entry_or_default(name).push(node),
                None => tracing::debug!("Dropping route with no outlet under named children"),
            },
        }
    }

    fn into_node(self) -> Option<(Option<&'a str>, RouteNode)> {
        let mut route = self.route?;
        route.children = self.collected.into_children();
        Some((self.outlet, RouteNode::Route(route)))
    }
}
