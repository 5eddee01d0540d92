//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use crate::ports::filesystem::{FileSystem, FsError};
use crate::trace::format::ProbeTrace;
use crate::trace::replayer::TraceReplayer;

/// Replays recorded filesystem probes from a trace.
pub struct ReplayingFileSystem {
    replayer: Mutex<TraceReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a trace replayer.
    #[must_use]
    pub fn new(replayer: TraceReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Reads a trace file from disk and wraps it in a replaying filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the trace file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read trace file {}: {e}", path.display()))?;
        let trace = ProbeTrace::from_yaml(&content)?;
        Ok(Self::new(TraceReplayer::new(&trace)))
    }
}

impl ReplayingFileSystem {
    /// Serves the next `method` probe, checking it was recorded for `path`.
    ///
    /// # Panics
    ///
    /// Panics when the recorded path differs from `path`: the caller has
    /// diverged from the recorded session and any answer would be wrong.
    fn next_output(&self, method: &str, path: &Path) -> serde_json::Value {
        let probe = self.replayer.lock().expect("replayer lock poisoned").next_probe(method);
        let requested = path.display().to_string();
        let recorded = probe.input.get("path").and_then(serde_json::Value::as_str);
        assert!(
            recorded == Some(requested.as_str()),
            "Trace diverged: fs::{method} call seq={seq} was recorded for path={recorded:?}, \
             but path={requested:?} was requested",
            seq = probe.seq,
        );
        probe.output
    }
}

impl FileSystem for ReplayingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let output = self.next_output("exists", path);
        output.as_bool().expect("fs::exists: expected boolean output")
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let output = self.next_output("read_to_string", path);
        if let Some(err) = output.get("err") {
            return Err(err.as_str().unwrap_or("unknown error").to_string().into());
        }
        let value = output.get("ok").unwrap_or(&output);
        serde_json::from_value(value.clone())
            .map_err(|e| format!("fs::read_to_string: failed to deserialize: {e}").into())
    }
}
