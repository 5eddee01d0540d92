//! Recording adapters that capture probes into a trace.

pub mod filesystem;

pub use filesystem::RecordingFileSystem;

use std::sync::{Arc, Mutex};

use crate::trace::recorder::TraceRecorder;

/// Record a `Result<String, E>` probe using the ok/err JSON convention.
///
/// - `Ok(v)` is stored as `{"ok": v}`
/// - `Err(e)` is stored as `{"err": e.to_string()}`
pub(crate) fn record_result<E: std::fmt::Display>(
    recorder: &Arc<Mutex<TraceRecorder>>,
    method: &str,
    input: serde_json::Value,
    result: &Result<String, E>,
) {
    let output = match result {
        Ok(value) => serde_json::json!({ "ok": value }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(method, input, output);
}
