//! Authored tree loading from disk.
//!
//! `.toml` files hold a `routes` array of element tables. Anything else is
//! read as JSON: either one element or an array of elements.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::element::Element;

/// Errors that can occur while loading a tree file.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTree {
    Many(Vec<Element>),
    One(Box<Element>),
}

#[derive(Deserialize)]
struct TomlTree {
    #[serde(default)]
    routes: Vec<Element>,
}

/// Load the top-level elements of a tree file.
pub fn load_tree(path: &Path) -> Result<Vec<Element>, TreeError> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let elements = if is_toml {
        parse_toml_tree(&content)?
    } else {
        parse_json_tree(&content)?
    };

    tracing::debug!(path = ?path, elements = elements.len(), "Tree file loaded");
    Ok(elements)
}

pub fn parse_json_tree(content: &str) -> Result<Vec<Element>, TreeError> {
    Ok(match serde_json::from_str::<JsonTree>(content)? {
        JsonTree::Many(elements) => elements,
        JsonTree::One(element) => vec![*element],
    })
}

pub fn parse_toml_tree(content: &str) -> Result<Vec<Element>, TreeError> {
    let tree: TomlTree = toml::from_str(content)?;
    Ok(tree.routes)
}
