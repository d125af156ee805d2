//! Constants shared by the resolver and the engine.

/// Class that marks an element as a diagram placeholder.
pub const DEFAULT_PLACEHOLDER_CLASS: &str = "mermaid";

/// Mermaid ESM build loaded by the activation script.
pub const DEFAULT_MODULE_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";

/// Attribute marking a script injected by engine activation.
pub const ENGINE_MARKER_ATTR: &str = "data-diagram-engine";
