//! route-config CLI
//!
//! Normalizes an authored route tree file into route config.
//!
//! ```text
//!   tree.json / tree.toml
//!        │
//!        ▼
//!   element::loader ──▶ routing::normalizer ──▶ RouteNode tree
//!                                                   │
//!                         ┌─────────────────────────┴───────────────┐
//!                         ▼                                         ▼
//!                  build: JSON on stdout               redirects: path -> location
//! ```

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use route_config::config::loader::load_config;
use route_config::element::loader::load_tree;
use route_config::observability::logging::init_logging;
use route_config::routing::{
    walk, Normalizer, Params, PathFormatter, RenderContext, RouteNode, TemplateFormatter,
};
use route_config::AppConfig;

#[derive(Parser)]
#[command(name = "route-config")]
#[command(about = "Normalize declarative route trees into route config", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized route config as JSON
    Build {
        /// Tree file (.json or .toml)
        tree: PathBuf,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// List every redirect and the location it resolves to
    Redirects {
        /// Tree file (.json or .toml)
        tree: PathBuf,

        /// Path parameter of the current match, as key=value
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

/// One `from -> location` line per redirect, in tree order. A target that
/// cannot be formatted yields `from -> error: ...` instead.
fn redirect_lines<F>(routes: &[RouteNode], ctx: &RenderContext<'_, F>) -> Vec<String>
where
    F: PathFormatter,
    F::Error: fmt::Display,
{
    walk(routes)
        .filter_map(RouteNode::as_redirect)
        .map(|redirect| match redirect.render(ctx) {
            Ok(signal) => format!("{} -> {}", redirect.path(), signal.location),
            Err(e) => {
                tracing::warn!(from = redirect.path(), error = %e, "Redirect target unresolved");
                format!("{} -> error: {}", redirect.path(), e)
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::debug!(
        route = %config.types.route,
        redirect = %config.types.redirect,
        max_proxy_depth = config.normalizer.max_proxy_depth,
        "Configuration loaded"
    );

    let normalizer = Normalizer::from_config(&config);

    match cli.command {
        Commands::Build { tree, compact } => {
            let elements = load_tree(&tree)?;
            let routes = normalizer.build_config(&elements)?;
            let output = if compact {
                serde_json::to_string(&routes)?
            } else {
                serde_json::to_string_pretty(&routes)?
            };
            println!("{}", output);
        }
        Commands::Redirects { tree, params } => {
            let elements = load_tree(&tree)?;
            let routes = normalizer.build_config(&elements)?;
            let params: Params = params.into_iter().collect();
            let ctx = RenderContext::new(&params, &TemplateFormatter);

            for line in redirect_lines(&routes, &ctx) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_config::element::Element;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("id=7"), Ok(("id".to_string(), "7".to_string())));
        assert!(parse_param("id").is_err());
    }

    #[test]
    fn test_redirect_lines_report_unresolved_targets() {
        let tree = Element::new("Route").path("/").children([
            Element::new("Redirect").prop("from", "widget/:id").prop("to", "/widgets/:id"),
            Element::new("Redirect").prop("from", "user/:uid").prop("to", "/users/:uid"),
        ]);
        let routes = Normalizer::default().build_config(&tree).unwrap();
        let params: Params = [("id".to_string(), "7".to_string())].into_iter().collect();
        let ctx = RenderContext::new(&params, &TemplateFormatter);

        assert_eq!(
            redirect_lines(&routes, &ctx),
            vec![
                "widget/:id -> /widgets/7".to_string(),
                "user/:uid -> error: missing path parameter `uid`".to_string(),
            ]
        );
    }
}
