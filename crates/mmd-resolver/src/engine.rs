//! Activation of the external diagram rendering engine.
//!
//! The engine itself (parsing and drawing diagrams) lives in the browser. This
//! module only hands control to it once placeholders have been populated.

use std::cell::Cell;
use std::rc::Rc;

use lol_html::html_content::{ContentType, EndTag};
use lol_html::{EndTagHandler, HandlerResult, RewriteStrSettings, element, rewrite_str};

use crate::consts::{DEFAULT_MODULE_URL, ENGINE_MARKER_ATTR};

/// Seam to an external diagram rendering engine.
///
/// Activation is fire-and-forget: implementations must not fail and the
/// caller never inspects rendering results.
pub trait DiagramEngine {
    /// Make the engine render every populated placeholder of `html`.
    fn activate(&self, html: &mut String);
}

/// Mermaid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether Mermaid starts rendering automatically once the page is ready.
    pub start_on_load: bool,
    /// URL of the Mermaid ES module.
    pub module_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_on_load: true,
            module_url: DEFAULT_MODULE_URL.to_owned(),
        }
    }
}

/// Activates Mermaid by adding its initialization script to the page.
///
/// The script is placed just before the first `</body>`. When the page has no
/// `body` element, or its end tag is omitted, the script goes at the end of
/// the document. Scripts left by an earlier activation are removed first, so
/// the current configuration always wins and the page carries one script.
#[derive(Debug, Clone, Default)]
pub struct MermaidEngine {
    config: EngineConfig,
}

impl MermaidEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The `<script>` element that imports and initializes Mermaid.
    #[must_use]
    pub fn activation_script(&self) -> String {
        format!(
            "<script type=\"module\" {ENGINE_MARKER_ATTR}=\"mermaid\">\n\
             import mermaid from '{}';\n\
             mermaid.initialize({{ startOnLoad: {} }});\n\
             </script>",
            escape_single_quoted(&self.config.module_url),
            self.config.start_on_load,
        )
    }
}

impl DiagramEngine for MermaidEngine {
    fn activate(&self, html: &mut String) {
        let script = self.activation_script();
        let marker_selector = format!("script[{ENGINE_MARKER_ATTR}]");
        let body_seen = Cell::new(false);
        let landed = Rc::new(Cell::new(false));

        let result = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(marker_selector, |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!("body", |el| {
                        if body_seen.replace(true) {
                            return Ok(());
                        }
                        if let Some(handlers) = el.end_tag_handlers() {
                            let landed = Rc::clone(&landed);
                            let script = script.clone();
                            let handler: EndTagHandler<'static> = Box::new(
                                move |end: &mut EndTag<'_>| -> HandlerResult {
                                    end.before(&script, ContentType::Html);
                                    landed.set(true);
                                    Ok(())
                                },
                            );
                            handlers.push(handler);
                        }
                        Ok(())
                    }),
                ],
                strict: false,
                ..RewriteStrSettings::new()
            },
        );

        match result {
            Ok(rewritten) => {
                *html = rewritten;
                if !landed.get() {
                    tracing::debug!("No body end tag, activation script appended to document");
                    html.push_str(&script);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to rewrite page, appending activation script");
                html.push_str(&script);
            }
        }
        tracing::debug!(start_on_load = self.config.start_on_load, "Diagram engine activated");
    }
}

/// Escape a value for a single-quoted JavaScript string literal.
fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
