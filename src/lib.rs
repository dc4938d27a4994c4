//! Declarative route trees → normalized route config.

pub mod config;
pub mod element;
pub mod observability;
pub mod routing;

pub use config::schema::AppConfig;
pub use element::{ComponentRef, Element, ElementType};
pub use routing::{build_config, Normalizer, RouteNode};
