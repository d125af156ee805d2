//! Immutable mapping from symbolic keys to diagram sources.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::catalog::BUILTIN_DIAGRAMS;

/// Process-wide built-in catalog, constructed on first use.
static BUILTIN: LazyLock<DiagramRegistry> =
    LazyLock::new(|| DiagramRegistry::from_entries(BUILTIN_DIAGRAMS.iter().copied()));

/// A single registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramEntry<'a> {
    /// Short symbolic identifier, unique across the registry.
    pub key: &'a str,
    /// Diagram source in the rendering engine's syntax (never parsed here).
    pub source: &'a str,
}

/// Registry mapping symbolic keys to diagram source text.
///
/// Populated once and never mutated afterward. Keys are kept in ascending
/// order so diagnostics listing the known keys are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramRegistry {
    entries: BTreeMap<String, String>,
}

impl DiagramRegistry {
    /// The compiled-in catalog of architecture diagrams.
    ///
    /// Contains `message`, `overview`, `startup` and `streamMessage`.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a registry from `(key, source)` pairs.
    ///
    /// When a key appears more than once the later source wins and a warning
    /// names the key.
    #[must_use]
    pub fn from_entries<K, S>(entries: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, source) in entries {
            let key = key.into();
            if map.contains_key(&key) {
                tracing::warn!(key = %key, "Duplicate diagram key, keeping the last source");
            }
            map.insert(key, source.into());
        }
        Self { entries: map }
    }

    /// Return a new registry with `other` layered over `self`.
    ///
    /// Entries from `other` replace entries of `self` with the same key.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        for (key, source) in &other.entries {
            if entries.insert(key.clone(), source.clone()).is_some() {
                tracing::debug!(key = %key, "Diagram overridden");
            }
        }
        Self { entries }
    }

    /// Look up the source registered under `key`.
    ///
    /// Absence is an expected outcome, not an error.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Known keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterate over all entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = DiagramEntry<'_>> {
        self.entries.iter().map(|(key, source)| DiagramEntry { key, source })
    }

    /// Number of registered diagrams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no diagrams.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check whether `key` is a plain identifier usable as a diagram key.
///
/// Keys are non-empty and consist of ASCII alphanumerics, `_` and `-`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DiagramRegistry {
        DiagramRegistry::from_entries([("a", "X"), ("b", "Y")])
    }

    #[test]
    fn test_lookup_present_key() {
        let registry = sample();
        assert_eq!(registry.lookup("a"), Some("X"));
        assert_eq!(registry.lookup("b"), Some("Y"));
    }

    #[test]
    fn test_lookup_absent_key() {
        let registry = sample();
        assert_eq!(registry.lookup("c"), None);
        assert_eq!(registry.lookup(""), None);
        assert_eq!(registry.lookup("A"), None);
    }

    #[test]
    fn test_lookup_preserves_source_bytes() {
        let source = "\nflowchart TD\n    subgraph  \n    A -->|x| B\n    \n";
        let registry = DiagramRegistry::from_entries([("flow", source)]);
        assert_eq!(registry.lookup("flow"), Some(source));
    }

    #[test]
    fn test_keys_sorted() {
        let registry = DiagramRegistry::from_entries([("b", "Y"), ("a", "X"), ("c", "Z")]);
        assert_eq!(registry.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let registry = DiagramRegistry::from_entries([("a", "first"), ("a", "second")]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("a"), Some("second"));
    }

    #[test]
    fn test_merged_overrides() {
        let base = sample();
        let extra = DiagramRegistry::from_entries([("b", "Y2"), ("d", "W")]);
        let merged = base.merged(&extra);

        assert_eq!(merged.keys(), vec!["a", "b", "d"]);
        assert_eq!(merged.lookup("b"), Some("Y2"));
        // Inputs untouched
        assert_eq!(base.lookup("b"), Some("Y"));
    }

    #[test]
    fn test_entries_in_key_order() {
        let registry = sample();
        let entries: Vec<_> = registry.entries().collect();
        assert_eq!(
            entries,
            vec![
                DiagramEntry { key: "a", source: "X" },
                DiagramEntry { key: "b", source: "Y" },
            ]
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = DiagramRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.keys().is_empty());
        assert_eq!(registry.lookup("a"), None);
    }

    #[test]
    fn test_builtin_keys() {
        let registry = DiagramRegistry::builtin();
        assert_eq!(
            registry.keys(),
            vec!["message", "overview", "startup", "streamMessage"]
        );
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(
            DiagramRegistry::builtin(),
            DiagramRegistry::builtin()
        ));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("overview"));
        assert!(is_valid_key("streamMessage"));
        assert!(is_valid_key("stream-message_2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("has space"));
        assert!(!is_valid_key("dot.ted"));
        assert!(!is_valid_key("slash/key"));
    }
}
