//! Placeholder discovery and population.
//!
//! This module provides [`PlaceholderResolver`], which scans an HTML page for
//! placeholder elements, injects matching diagram sources and then activates
//! the rendering engine.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use lol_html::html_content::{ContentType, EndTag};
use lol_html::{EndTagHandler, HandlerResult, RewriteStrSettings, element, rewrite_str};
use mmd_registry::DiagramRegistry;

use crate::consts::DEFAULT_PLACEHOLDER_CLASS;
use crate::engine::DiagramEngine;

/// Why a placeholder was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The registry has no entry for the key.
    UnknownKey,
    /// The element is void or its end tag is omitted, so its content has no
    /// boundary that can be replaced safely.
    NoEndTag,
}

/// A placeholder that could not be populated.
///
/// This is recovered locally: the placeholder is left untouched and the
/// error is logged and collected in [`Resolution::unresolved`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.key, .known_keys, .reason))]
pub struct UnresolvedPlaceholder {
    /// Key carried by the placeholder (empty when it has no `id`).
    pub key: String,
    /// Keys known to the registry at resolution time.
    pub known_keys: Vec<String>,
    /// Why the placeholder was skipped.
    pub reason: UnresolvedReason,
}

fn describe(key: &str, known_keys: &[String], reason: &UnresolvedReason) -> String {
    match reason {
        UnresolvedReason::UnknownKey => {
            format!("Failed to find '{key}' in [{}]", known_keys.join(", "))
        }
        UnresolvedReason::NoEndTag => format!("Placeholder '{key}' has no end tag, left untouched"),
    }
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Page with populated placeholders and the engine activated.
    pub html: String,
    /// Keys of populated placeholders, in document order.
    pub resolved: Vec<String>,
    /// One entry per placeholder that could not be populated, in document order.
    pub unresolved: Vec<UnresolvedPlaceholder>,
}

impl Resolution {
    /// Number of placeholders visited.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }

    /// Whether every placeholder was populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Connects placeholder elements to registry entries.
///
/// A placeholder is any element carrying the placeholder class (default
/// `mermaid`). Its `id` attribute is the registry key.
///
/// # Example
///
/// ```
/// use mmd_registry::DiagramRegistry;
/// use mmd_resolver::{MermaidEngine, PlaceholderResolver};
///
/// let registry = DiagramRegistry::from_entries([("a", "X")]);
/// let resolution = PlaceholderResolver::new(&registry)
///     .placeholder_class("diagram")
///     .resolve_all(r#"<pre class="diagram" id="a"></pre>"#, &MermaidEngine::default());
///
/// assert!(resolution.html.starts_with(r#"<pre class="diagram" id="a">X</pre>"#));
/// ```
pub struct PlaceholderResolver<'r> {
    registry: &'r DiagramRegistry,
    placeholder_class: String,
}

impl<'r> PlaceholderResolver<'r> {
    /// Create a resolver backed by `registry`.
    #[must_use]
    pub fn new(registry: &'r DiagramRegistry) -> Self {
        Self {
            registry,
            placeholder_class: DEFAULT_PLACEHOLDER_CLASS.to_owned(),
        }
    }

    /// Set the class that marks placeholder elements.
    #[must_use]
    pub fn placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.placeholder_class = class.into();
        self
    }

    /// Populate every placeholder of `html`, then activate `engine`.
    ///
    /// Placeholders are those present in the input. Matched placeholders get
    /// their content replaced with the source verbatim; unmatched ones are
    /// left untouched and reported. The engine is activated exactly once,
    /// after the whole pass, even when the page has no placeholders.
    ///
    /// Never fails: if the page cannot be rewritten it is passed through
    /// unchanged with a warning.
    pub fn resolve_all(&self, html: &str, engine: &dyn DiagramEngine) -> Resolution {
        let mut resolution = match self.populate(html) {
            Ok(resolution) => resolution,
            Err(message) => {
                tracing::warn!(error = %message, "Failed to resolve placeholders, page left unchanged");
                Resolution {
                    html: html.to_owned(),
                    resolved: Vec::new(),
                    unresolved: Vec::new(),
                }
            }
        };

        tracing::info!(
            resolved = resolution.resolved.len(),
            unresolved = resolution.unresolved.len(),
            "Placeholder resolution finished"
        );

        engine.activate(&mut resolution.html);
        resolution
    }

    /// Rewrite the page until no populated placeholder lacks an end tag.
    ///
    /// Replacing the content of an element whose end tag never arrives would
    /// swallow the rest of the document. Such placeholders are found after a
    /// pass and skipped in the next one, so the page only ever loses content
    /// inside properly closed placeholders.
    fn populate(&self, html: &str) -> Result<Resolution, String> {
        if !is_valid_class(&self.placeholder_class) {
            return Err(format!(
                "invalid placeholder class '{}'",
                self.placeholder_class
            ));
        }

        let mut skipped = BTreeSet::new();
        let resolution = loop {
            let pass = self.rewrite(html, &skipped)?;
            // Only the first unclosed placeholder is certain: anything after it
            // was inside content that this pass dropped.
            match pass.unclosed.first() {
                Some(&index) => {
                    tracing::debug!(index, "Placeholder has no end tag, rewriting without it");
                    skipped.insert(index);
                }
                None => break pass.resolution,
            }
        };

        for unresolved in &resolution.unresolved {
            match unresolved.reason {
                UnresolvedReason::UnknownKey => tracing::warn!(
                    key = %unresolved.key,
                    known_keys = %unresolved.known_keys.join(", "),
                    "Failed to find diagram for placeholder"
                ),
                UnresolvedReason::NoEndTag => tracing::warn!(
                    key = %unresolved.key,
                    "Placeholder has no end tag, left untouched"
                ),
            }
        }

        Ok(resolution)
    }

    /// Single rewriting pass, leaving the placeholders at `skipped` positions alone.
    fn rewrite(&self, html: &str, skipped: &BTreeSet<usize>) -> Result<Pass, String> {
        let selector = format!(".{}", self.placeholder_class);
        let next_index = Cell::new(0usize);
        let replaced = RefCell::new(Vec::new());
        let closed = Rc::new(RefCell::new(BTreeSet::new()));
        let resolved = RefCell::new(Vec::new());
        let unresolved = RefCell::new(Vec::new());

        let unresolved_entry = |key: String, reason| UnresolvedPlaceholder {
            key,
            known_keys: self.registry.keys().into_iter().map(str::to_owned).collect(),
            reason,
        };

        let output = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(selector, |el| {
                    let index = next_index.replace(next_index.get() + 1);
                    let key = el.get_attribute("id").unwrap_or_default();

                    let Some(source) = self.registry.lookup(&key) else {
                        unresolved
                            .borrow_mut()
                            .push(unresolved_entry(key, UnresolvedReason::UnknownKey));
                        return Ok(());
                    };
                    if skipped.contains(&index) {
                        unresolved
                            .borrow_mut()
                            .push(unresolved_entry(key, UnresolvedReason::NoEndTag));
                        return Ok(());
                    }
                    let Some(handlers) = el.end_tag_handlers() else {
                        unresolved
                            .borrow_mut()
                            .push(unresolved_entry(key, UnresolvedReason::NoEndTag));
                        return Ok(());
                    };

                    let closed = Rc::clone(&closed);
                    let handler: EndTagHandler<'static> =
                        Box::new(move |_end: &mut EndTag<'_>| -> HandlerResult {
                            closed.borrow_mut().insert(index);
                            Ok(())
                        });
                    handlers.push(handler);
                    el.set_inner_content(source, ContentType::Html);
                    replaced.borrow_mut().push(index);
                    resolved.borrow_mut().push(key);
                    Ok(())
                })],
                strict: false,
                ..RewriteStrSettings::new()
            },
        )
        .map_err(|e| e.to_string())?;

        let closed = closed.borrow();
        let unclosed = replaced
            .into_inner()
            .into_iter()
            .filter(|index| !closed.contains(index))
            .collect();

        Ok(Pass {
            resolution: Resolution {
                html: output,
                resolved: resolved.into_inner(),
                unresolved: unresolved.into_inner(),
            },
            unclosed,
        })
    }
}

/// Result of one rewriting pass.
struct Pass {
    resolution: Resolution,
    /// Positions of populated placeholders whose end tag never arrived, ascending.
    unclosed: Vec<usize>,
}

/// Check whether `class` is usable as a placeholder class.
///
/// Accepts an ASCII letter or `_` followed by ASCII alphanumerics, `_` or `-`.
#[must_use]
pub fn is_valid_class(class: &str) -> bool {
    let mut bytes = class.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
