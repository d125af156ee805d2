//! Placeholder resolution and diagram engine activation for HTML pages.
//!
//! This crate performs the one-shot, load-time transformation of a page:
//! - [`PlaceholderResolver`] finds placeholder elements, looks their `id` up in a
//!   [`DiagramRegistry`](mmd_registry::DiagramRegistry) and injects the source
//! - [`UnresolvedPlaceholder`] is reported (never raised) for unknown keys and
//!   for placeholders whose content has no end tag to bound it
//! - [`DiagramEngine`] is the seam to the external renderer; [`MermaidEngine`]
//!   activates Mermaid by appending its initialization script
//!
//! # Example
//!
//! ```
//! use mmd_registry::DiagramRegistry;
//! use mmd_resolver::{MermaidEngine, PlaceholderResolver};
//!
//! let registry = DiagramRegistry::from_entries([("a", "graph TD\n  A-->B\n")]);
//! let html = r#"<body><div class="mermaid" id="a"></div></body>"#;
//!
//! let resolution = PlaceholderResolver::new(&registry).resolve_all(html, &MermaidEngine::default());
//!
//! assert!(resolution.is_complete());
//! assert!(resolution.html.contains("A-->B"));
//! ```

mod consts;
mod engine;
mod resolver;

pub use consts::{DEFAULT_MODULE_URL, DEFAULT_PLACEHOLDER_CLASS, ENGINE_MARKER_ATTR};
pub use engine::{DiagramEngine, EngineConfig, MermaidEngine};
pub use resolver::{
    PlaceholderResolver, Resolution, UnresolvedPlaceholder, UnresolvedReason, is_valid_class,
};
