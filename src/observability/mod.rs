//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! normalizer / redirect / loaders produce:
//!     → tracing events (debug summaries, trace per skipped element)
//!     → logging.rs (subscriber: env filter + fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - `RUST_LOG` overrides the configured level

pub mod logging;
