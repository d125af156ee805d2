//! Static registry of named diagram sources.
//!
//! This crate holds the hand-authored Mermaid sources that document the
//! orchestrator/runner architecture, keyed by short symbolic names:
//! - [`DiagramRegistry`] is an immutable `key -> source` map with total lookup
//! - [`DiagramRegistry::builtin`] exposes the compiled-in catalog
//! - [`load_dir`] reads extra `*.mmd` files from a local directory
//!
//! Sources are opaque to this crate. They are stored and returned byte for
//! byte because the rendering engine is sensitive to whitespace and
//! punctuation in its description syntax.
//!
//! # Example
//!
//! ```
//! use mmd_registry::DiagramRegistry;
//!
//! let registry = DiagramRegistry::builtin();
//! assert!(registry.lookup("overview").is_some());
//! assert!(registry.lookup("missing").is_none());
//! ```

mod catalog;
mod loader;
mod registry;

pub use loader::{LoadError, load_dir};
pub use registry::{DiagramEntry, DiagramRegistry, is_valid_key};
