//! Authored element trees.
//!
//! # Data Flow
//! ```text
//! tree file (JSON/TOML) ──▶ loader.rs ──┐
//!                                        ├──▶ Element { type, props, children }
//! builder API (Element::new...) ────────┘          │
//!                                                  ▼
//!                                   routing::normalizer (classify + build)
//! ```
//!
//! # Design Decisions
//! - Elements are plain data; nothing here knows what a Route is
//! - `type` may be a proxy and is only classified after unwrapping
//! - Children are a single element, a list, or named outlets
//! - Dropping a tree never recurses, so arbitrarily deep trees are safe

pub mod identity;
pub mod loader;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::routing::outlets::OutletMap;

pub use identity::{ElementType, Proxy, TypeKey, Unwrappable};

/// Opaque reference to a component, copied verbatim into route descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A single prop value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Arrays, tables and nulls. Carried along, never interpreted.
    Other(serde_json::Value),
    #[serde(skip)]
    Component(ComponentRef),
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Integer(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<ComponentRef> for PropValue {
    fn from(value: ComponentRef) -> Self {
        PropValue::Component(value)
    }
}

/// Element props, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// The prop as text, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PropValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// `path` prop.
    pub fn path(&self) -> Option<&str> {
        self.text("path")
    }

    /// `Component` prop. A textual value names the component.
    pub fn component(&self) -> Option<ComponentRef> {
        match self.0.get("Component") {
            Some(PropValue::Component(component)) => Some(component.clone()),
            Some(PropValue::Text(name)) => Some(ComponentRef::new(name.as_str())),
            _ => None,
        }
    }
}

/// A child that renders as text or as nothing: null, booleans, numbers,
/// strings. Accepted in child position and dropped.
struct Inert;

impl<'de> Deserialize<'de> for Inert {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InertVisitor;

        impl<'de> Visitor<'de> for InertVisitor {
            type Value = Inert;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("null, a boolean, a number or a string")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_none<E: de::Error>(self) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Inert, E> {
                Ok(Inert)
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<Inert, E> {
                Ok(Inert)
            }
        }

        deserializer.deserialize_any(InertVisitor)
    }
}

/// One entry of a children list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChildNode {
    Element(Element),
    Inert(Inert),
}

fn keep_elements(nodes: Vec<ChildNode>) -> Vec<Element> {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            ChildNode::Element(element) => Some(element),
            ChildNode::Inert(_) => None,
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Many(Vec<ChildNode>),
    One(Box<Element>),
    Inert(Inert),
}

impl From<SlotRepr> for ChildSlot {
    fn from(repr: SlotRepr) -> Self {
        match repr {
            SlotRepr::Many(nodes) => ChildSlot::Many(keep_elements(nodes)),
            SlotRepr::One(element) => ChildSlot::One(element),
            SlotRepr::Inert(_) => ChildSlot::Many(Vec::new()),
        }
    }
}

/// Value of one named outlet: one element or several.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SlotRepr")]
pub enum ChildSlot {
    Many(Vec<Element>),
    One(Box<Element>),
}

impl ChildSlot {
    pub fn as_slice(&self) -> &[Element] {
        match self {
            ChildSlot::Many(elements) => elements.as_slice(),
            ChildSlot::One(element) => std::slice::from_ref(element.as_ref()),
        }
    }

    fn into_elements(self) -> Vec<Element> {
        match self {
            ChildSlot::Many(elements) => elements,
            ChildSlot::One(element) => vec![*element],
        }
    }
}

impl From<Element> for ChildSlot {
    fn from(element: Element) -> Self {
        ChildSlot::One(Box::new(element))
    }
}

impl From<Vec<Element>> for ChildSlot {
    fn from(elements: Vec<Element>) -> Self {
        ChildSlot::Many(elements)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChildrenRepr {
    List(Vec<ChildNode>),
    Single(Box<Element>),
    Inert(Inert),
    Named(OutletMap<ChildSlot>),
}

impl From<ChildrenRepr> for Children {
    fn from(repr: ChildrenRepr) -> Self {
        match repr {
            ChildrenRepr::List(nodes) => Children::List(keep_elements(nodes)),
            ChildrenRepr::Single(element) => Children::Single(element),
            ChildrenRepr::Inert(_) => Children::None,
            ChildrenRepr::Named(outlets) => Children::Named(outlets),
        }
    }
}

/// Children of an authored element. Text and null entries are dropped while
/// loading; they never become elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "ChildrenRepr")]
pub enum Children {
    #[default]
    None,
    List(Vec<Element>),
    Single(Box<Element>),
    Named(OutletMap<ChildSlot>),
}

impl Children {
    pub fn is_empty(&self) -> bool {
        match self {
            Children::None => true,
            Children::List(elements) => elements.is_empty(),
            Children::Single(_) => false,
            Children::Named(outlets) => outlets.is_empty(),
        }
    }

    /// Ordered children, or `None` for named outlets.
    pub fn as_ordered(&self) -> Option<&[Element]> {
        match self {
            Children::None => Some(&[][..]),
            Children::List(elements) => Some(elements.as_slice()),
            Children::Single(element) => Some(std::slice::from_ref(element.as_ref())),
            Children::Named(_) => None,
        }
    }

    fn into_elements(self) -> Vec<Element> {
        match self {
            Children::None => Vec::new(),
            Children::List(elements) => elements,
            Children::Single(element) => vec![*element],
            Children::Named(outlets) => outlets
                .into_values()
                .flat_map(ChildSlot::into_elements)
                .collect(),
        }
    }
}

/// One node of an authored tree.
#[derive(Debug, Clone)]
pub struct Element {
    pub ty: ElementType,
    pub props: Props,
    pub children: Children,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementFields {
    #[serde(rename = "type")]
    ty: ElementType,
    #[serde(default)]
    props: Props,
    #[serde(default)]
    children: Children,
}

// Only objects are elements. A derived impl would also read a positional
// array, turning `["note", {...}]` into a bogus element.
impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ElementVisitor;

        impl<'de> Visitor<'de> for ElementVisitor {
            type Value = Element;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an element object with a `type`")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Element, A::Error> {
                let fields = ElementFields::deserialize(MapAccessDeserializer::new(map))?;
                Ok(Element {
                    ty: fields.ty,
                    props: fields.props,
                    children: fields.children,
                })
            }
        }

        deserializer.deserialize_map(ElementVisitor)
    }
}

impl Element {
    pub fn new(ty: impl Into<ElementType>) -> Self {
        Self {
            ty: ty.into(),
            props: Props::default(),
            children: Children::None,
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    pub fn path(self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        self.prop("path", path)
    }

    pub fn component(self, component: impl Into<ComponentRef>) -> Self {
        let component: ComponentRef = component.into();
        self.prop("Component", component)
    }

    /// Append an ordered child. Replaces named outlets, if any.
    pub fn child(mut self, child: Element) -> Self {
        self.children = match std::mem::take(&mut self.children) {
            Children::None | Children::Named(_) => Children::Single(Box::new(child)),
            Children::Single(first) => Children::List(vec![*first, child]),
            Children::List(mut elements) => {
                elements.push(child);
                Children::List(elements)
            }
        };
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children = Children::List(children.into_iter().collect());
        self
    }

    /// Add a named outlet. Replaces ordered children, if any.
    pub fn outlet(mut self, name: impl Into<String>, slot: impl Into<ChildSlot>) -> Self {
        let mut outlets = match std::mem::take(&mut self.children) {
            Children::Named(outlets) => outlets,
            _ => OutletMap::new(),
        };
        outlets.insert(name, slot.into());
        self.children = Children::Named(outlets);
        self
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending = vec![std::mem::take(&mut self.children)];
        while let Some(children) = pending.pop() {
            for mut element in children.into_elements() {
                pending.push(std::mem::take(&mut element.children));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_children() {
        let el = Element::new("Route")
            .path("/")
            .child(Element::new("Route").path("a"))
            .child(Element::new("Route").path("b"));

        let children = el.children.as_ordered().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].props.path(), Some("b"));
    }

    #[test]
    fn test_component_from_text_prop() {
        let el = Element::new("Route").prop("Component", "AppPage");
        assert_eq!(el.props.component(), Some(ComponentRef::new("AppPage")));
    }

    #[test]
    fn test_deserialize_named_children() {
        let el: Element = serde_json::from_str(
            r#"{
                "type": "Route",
                "props": { "path": "foo" },
                "children": {
                    "nav": { "type": "Route", "props": { "path": "(.*)?" } },
                    "main": [
                        { "type": "Route", "props": { "path": "a" } },
                        { "type": "Route", "props": { "path": "b" } }
                    ]
                }
            }"#,
        )
        .unwrap();

        let Children::Named(outlets) = &el.children else {
            panic!("expected named children, got {:?}", el.children);
        };
        assert_eq!(outlets.keys().collect::<Vec<_>>(), vec!["nav", "main"]);
        assert_eq!(outlets.get("main").unwrap().as_slice().len(), 2);
    }

    #[test]
    fn test_deserialize_single_child() {
        let el: Element = serde_json::from_str(
            r#"{ "type": "Route", "children": { "type": "Route", "props": { "path": "x" } } }"#,
        )
        .unwrap();
        assert!(matches!(el.children, Children::Single(_)));
    }

    #[test]
    fn test_text_child_keeps_its_sibling() {
        let el: Element = serde_json::from_str(
            r#"{
                "type": "Route",
                "props": { "path": "/" },
                "children": ["note", { "type": "Route", "props": { "path": "a" } }]
            }"#,
        )
        .unwrap();

        let children = el.children.as_ordered().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].props.path(), Some("a"));
    }

    #[test]
    fn test_array_is_not_an_element() {
        assert!(serde_json::from_str::<Element>(r#"["Route", { "path": "ghost" }]"#).is_err());

        let parsed = serde_json::from_str::<Element>(
            r#"{ "type": "Route", "props": { "path": "/" }, "children": ["Route", { "path": "ghost" }] }"#,
        );
        assert!(parsed.is_err(), "invented a child from {:?}", parsed);
    }

    #[test]
    fn test_null_and_scalar_children_are_dropped() {
        let el: Element = serde_json::from_str(
            r#"{ "type": "Route", "children": [{ "type": "Route" }, null, false, 3] }"#,
        )
        .unwrap();
        assert_eq!(el.children.as_ordered().unwrap().len(), 1);

        let el: Element =
            serde_json::from_str(r#"{ "type": "Route", "children": null }"#).unwrap();
        assert!(el.children.is_empty());

        let el: Element = serde_json::from_str(
            r#"{ "type": "Route", "children": { "main": [null, { "type": "Route" }], "aside": "text" } }"#,
        )
        .unwrap();
        let Children::Named(outlets) = &el.children else {
            panic!("expected named children, got {:?}", el.children);
        };
        assert_eq!(outlets.get("main").unwrap().as_slice().len(), 1);
        assert!(outlets.get("aside").unwrap().as_slice().is_empty());
    }

    #[test]
    fn test_non_scalar_props_load() {
        let el: Element = serde_json::from_str(
            r#"{
                "type": "Route",
                "props": { "path": "admin", "roles": ["admin"], "exact": null, "meta": { "title": "Admin" } }
            }"#,
        )
        .unwrap();

        assert_eq!(el.props.path(), Some("admin"));
        assert_eq!(
            el.props.get("roles"),
            Some(&PropValue::Other(serde_json::json!(["admin"])))
        );
        assert_eq!(el.props.get("exact"), Some(&PropValue::Other(serde_json::Value::Null)));
    }

    #[test]
    fn test_deep_tree_drops_without_overflow() {
        let mut el = Element::new("Route");
        for _ in 0..200_000 {
            el = Element::new("Route").child(el);
        }
        drop(el);
    }
}
