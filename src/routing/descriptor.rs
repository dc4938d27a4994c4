//! Route descriptors: the normalized, serializable output.
//!
//! # Shape
//! ```text
//! RouteNode
//!   ├─ Route    { path?, Component?, children? }
//!   │              children = Ordered([RouteNode])
//!   │                       | Named({ outlet: [RouteNode] })
//!   └─ Redirect { path, to }
//! ```
//!
//! # Design Decisions
//! - A descriptor has ordered or named children, never both
//! - Empty children are represented as absent, not as an empty list
//! - Descriptors are immutable values once built
//! - Traversal and drop use an explicit stack

use serde::Serialize;

use crate::element::ComponentRef;
use crate::routing::format::{PathFormatter, RenderContext};
use crate::routing::outlets::OutletMap;
use crate::routing::redirect::{RedirectDescriptor, RedirectSignal};

/// Child routes of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChildRoutes {
    Ordered(Vec<RouteNode>),
    Named(OutletMap<Vec<RouteNode>>),
}

impl ChildRoutes {
    /// Total number of direct child routes across all outlets.
    pub fn len(&self) -> usize {
        match self {
            ChildRoutes::Ordered(nodes) => nodes.len(),
            ChildRoutes::Named(outlets) => outlets.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ordered(&self) -> Option<&[RouteNode]> {
        match self {
            ChildRoutes::Ordered(nodes) => Some(nodes.as_slice()),
            ChildRoutes::Named(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&OutletMap<Vec<RouteNode>>> {
        match self {
            ChildRoutes::Ordered(_) => None,
            ChildRoutes::Named(outlets) => Some(outlets),
        }
    }

    fn into_nodes(self) -> Vec<RouteNode> {
        match self {
            ChildRoutes::Ordered(nodes) => nodes,
            ChildRoutes::Named(outlets) => outlets.into_values().flatten().collect(),
        }
    }
}

/// A matchable path segment with its component and children.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteDescriptor {
    /// Absent for pass-through routes that inherit the parent position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(rename = "Component", skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildRoutes>,
}

impl RouteDescriptor {
    pub fn new(path: Option<String>, component: Option<ComponentRef>) -> Self {
        Self {
            path,
            component,
            children: None,
        }
    }

    pub fn with_children(mut self, children: ChildRoutes) -> Self {
        self.children = (!children.is_empty()).then_some(children);
        self
    }
}

impl Drop for RouteDescriptor {
    fn drop(&mut self) {
        let Some(children) = self.children.take() else {
            return;
        };
        let mut pending = vec![children];
        while let Some(children) = pending.pop() {
            for mut node in children.into_nodes() {
                if let RouteNode::Route(route) = &mut node {
                    pending.extend(route.children.take());
                }
            }
        }
    }
}

/// What rendering a route yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Show this component.
    Display(ComponentRef),
    /// No component of its own; only its children render.
    Passthrough,
    /// Navigate elsewhere instead of rendering.
    Redirect(RedirectSignal),
}

/// A produced route: a plain route or a redirect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteNode {
    Route(RouteDescriptor),
    Redirect(RedirectDescriptor),
}

impl RouteNode {
    pub fn path(&self) -> Option<&str> {
        match self {
            RouteNode::Route(route) => route.path.as_deref(),
            RouteNode::Redirect(redirect) => Some(redirect.path()),
        }
    }

    pub fn children(&self) -> Option<&ChildRoutes> {
        match self {
            RouteNode::Route(route) => route.children.as_ref(),
            RouteNode::Redirect(_) => None,
        }
    }

    pub fn as_route(&self) -> Option<&RouteDescriptor> {
        match self {
            RouteNode::Route(route) => Some(route),
            RouteNode::Redirect(_) => None,
        }
    }

    pub fn as_redirect(&self) -> Option<&RedirectDescriptor> {
        match self {
            RouteNode::Route(_) => None,
            RouteNode::Redirect(redirect) => Some(redirect),
        }
    }

    pub fn render<F: PathFormatter>(
        &self,
        ctx: &RenderContext<'_, F>,
    ) -> Result<RenderOutcome, F::Error> {
        match self {
            RouteNode::Route(route) => Ok(match &route.component {
                Some(component) => RenderOutcome::Display(component.clone()),
                None => RenderOutcome::Passthrough,
            }),
            RouteNode::Redirect(redirect) => redirect.render(ctx).map(RenderOutcome::Redirect),
        }
    }
}

impl From<RouteDescriptor> for RouteNode {
    fn from(route: RouteDescriptor) -> Self {
        RouteNode::Route(route)
    }
}

impl From<RedirectDescriptor> for RouteNode {
    fn from(redirect: RedirectDescriptor) -> Self {
        RouteNode::Redirect(redirect)
    }
}

/// Depth-first, pre-order walk over a route tree. Outlets are visited in
/// insertion order.
pub fn walk(routes: &[RouteNode]) -> Walk<'_> {
    Walk {
        stack: routes.iter().rev().collect(),
    }
}

#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a RouteNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a RouteNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        match node.children() {
            Some(ChildRoutes::Ordered(nodes)) => self.stack.extend(nodes.iter().rev()),
            Some(ChildRoutes::Named(outlets)) => {
                for (_, nodes) in outlets.iter().rev() {
                    self.stack.extend(nodes.iter().rev());
                }
            }
            None => {}
        }
        Some(node)
    }
}
