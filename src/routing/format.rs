//! Render-time path formatting.
//!
//! # Responsibilities
//! - Define the formatting capability the router runtime hands to `render`
//! - Provide a default `:param` template formatter
//!
//! # Design Decisions
//! - Formatters are pure; they may be called repeatedly and concurrently
//! - Formatter errors are surfaced unchanged to whoever called `render`
//! - No default is invented for a missing parameter

use std::collections::HashMap;

use thiserror::Error;

/// Path parameters of the current match.
pub type Params = HashMap<String, String>;

/// Substitutes matched parameters into a path template.
pub trait PathFormatter {
    type Error;

    fn format(&self, template: &str, params: &Params) -> Result<String, Self::Error>;
}

/// What a route gets to see when rendered: the current match.
#[derive(Debug)]
pub struct RenderContext<'a, F> {
    pub params: &'a Params,
    pub formatter: &'a F,
}

impl<'a, F: PathFormatter> RenderContext<'a, F> {
    pub fn new(params: &'a Params, formatter: &'a F) -> Self {
        Self { params, formatter }
    }

    /// Format `template` against the current match's parameters.
    pub fn format(&self, template: &str) -> Result<String, F::Error> {
        self.formatter.format(template, self.params)
    }
}

/// Errors raised by [`TemplateFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing path parameter `{0}`")]
    MissingParam(String),
}

/// Formats `/widgets/:widgetId` style templates.
///
/// A `:name` token is replaced by the `name` parameter wherever it sits in a
/// segment; the name runs up to the first character outside `[A-Za-z0-9_]`.
/// A `:name?` token is dropped when the parameter is absent, and so is its
/// segment if nothing else is left in it. A `:` not followed by a name is
/// copied as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFormatter;

impl PathFormatter for TemplateFormatter {
    type Error = FormatError;

    fn format(&self, template: &str, params: &Params) -> Result<String, FormatError> {
        let mut segments = Vec::new();
        for segment in template.split('/') {
            segments.extend(format_segment(segment, params)?);
        }
        let path = segments.join("/");
        if path.is_empty() && template.starts_with('/') {
            return Ok("/".to_string());
        }
        Ok(path)
    }
}

/// `None` when the segment consisted only of dropped optional tokens.
fn format_segment(segment: &str, params: &Params) -> Result<Option<String>, FormatError> {
    let mut out = String::with_capacity(segment.len());
    let mut dropped = false;
    let mut rest = segment;

    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len == 0 {
            out.push(':');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        let (optional, tail) = match after[name_len..].strip_prefix('?') {
            Some(tail) => (true, tail),
            None => (false, &after[name_len..]),
        };
        match params.get(name) {
            Some(value) => out.push_str(value),
            None if optional => dropped = true,
            None => return Err(FormatError::MissingParam(name.to_string())),
        }
        rest = tail;
    }
    out.push_str(rest);

    Ok((!(dropped && out.is_empty())).then_some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_params() {
        let out = TemplateFormatter
            .format("/widgets/:widgetId", &params(&[("widgetId", "7")]))
            .unwrap();
        assert_eq!(out, "/widgets/7");
    }

    #[test]
    fn test_static_template_unchanged() {
        let out = TemplateFormatter.format("/bar", &Params::new()).unwrap();
        assert_eq!(out, "/bar");
    }

    #[test]
    fn test_missing_param_is_reported() {
        let err = TemplateFormatter
            .format("/widgets/:widgetId", &Params::new())
            .unwrap_err();
        assert_eq!(err, FormatError::MissingParam("widgetId".into()));
    }

    #[test]
    fn test_optional_param_dropped() {
        let out = TemplateFormatter
            .format("/docs/:section?", &Params::new())
            .unwrap();
        assert_eq!(out, "/docs");

        let out = TemplateFormatter
            .format("/docs/:section?", &params(&[("section", "intro")]))
            .unwrap();
        assert_eq!(out, "/docs/intro");
    }

    #[test]
    fn test_suffixed_placeholder() {
        let out = TemplateFormatter
            .format("/widgets/:id.json", &params(&[("id", "7")]))
            .unwrap();
        assert_eq!(out, "/widgets/7.json");
    }

    #[test]
    fn test_placeholder_inside_segment() {
        let out = TemplateFormatter
            .format("/w/item-:id", &params(&[("id", "3")]))
            .unwrap();
        assert_eq!(out, "/w/item-3");

        let err = TemplateFormatter.format("/w/item-:id", &Params::new()).unwrap_err();
        assert_eq!(err, FormatError::MissingParam("id".into()));
    }

    #[test]
    fn test_only_optional_formats_to_root() {
        let out = TemplateFormatter.format("/:lang?", &Params::new()).unwrap();
        assert_eq!(out, "/");

        let out = TemplateFormatter
            .format("/:lang?/docs", &Params::new())
            .unwrap();
        assert_eq!(out, "/docs");
    }

    #[test]
    fn test_bare_colon_is_literal() {
        let out = TemplateFormatter.format("/time/10:/x", &Params::new()).unwrap();
        assert_eq!(out, "/time/10:/x");
    }

    #[test]
    fn test_context_uses_its_params() {
        let p = params(&[("id", "42")]);
        let ctx = RenderContext::new(&p, &TemplateFormatter);
        assert_eq!(ctx.format("/users/:id/edit").unwrap(), "/users/42/edit");
    }
}
