//! Built-in architecture diagrams.
//!
//! Each source is embedded verbatim from `diagrams/<key>.mmd`, including the
//! leading and trailing newlines.

/// `(key, source)` pairs of the compiled-in catalog.
pub(crate) const BUILTIN_DIAGRAMS: &[(&str, &str)] = &[
    ("message", MESSAGE),
    ("overview", OVERVIEW),
    ("startup", STARTUP),
    ("streamMessage", STREAM_MESSAGE),
];

/// A message hopping from one processor to another through the orchestrator.
const MESSAGE: &str = include_str!("../diagrams/message.mmd");

/// Orchestrator, language runners, their processors and the shared channel.
const OVERVIEW: &str = include_str!("../diagrams/overview.mmd");

/// Runner and processor startup handshake.
const STARTUP: &str = include_str!("../diagrams/startup.mmd");

/// Streaming message setup and data transfer.
const STREAM_MESSAGE: &str = include_str!("../diagrams/streamMessage.mmd");
