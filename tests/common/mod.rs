//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::path::PathBuf;

use tempfile::TempDir;

use route_config::element::Element;
use route_config::routing::{Params, PathFormatter};
use route_config::ComponentRef;

/// Formatter that returns the template untouched.
pub struct Verbatim;

impl PathFormatter for Verbatim {
    type Error = Infallible;

    fn format(&self, template: &str, _params: &Params) -> Result<String, Infallible> {
        Ok(template.to_string())
    }
}

pub fn component(name: &str) -> ComponentRef {
    ComponentRef::new(name)
}

pub fn route(path: &str, component_name: &str) -> Element {
    Element::new("Route").path(path).component(component(component_name))
}

pub fn redirect(from: &str, to: &str) -> Element {
    Element::new("Redirect").prop("from", from).prop("to", to)
}

/// Write `content` to `name` inside `dir`. The file goes away with `dir`.
pub fn write_temp(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
