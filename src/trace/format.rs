//! Trace data structures for recorded filesystem probes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call against the filesystem port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Probe {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port method invoked (`exists` or `read_to_string`).
    pub method: String,
    /// Input passed to the method.
    pub input: serde_json::Value,
    /// Value the method returned.
    pub output: serde_json::Value,
}

/// A named, ordered list of probes captured during one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeTrace {
    /// Human-readable name for this trace.
    pub name: String,
    /// When this trace was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Free-form label, usually the command that produced the trace.
    pub label: String,
    /// Ordered list of probes.
    pub probes: Vec<Probe>,
}

impl ProbeTrace {
    /// Parses a trace from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid trace document.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("Failed to parse probe trace: {e}"))
    }
}
