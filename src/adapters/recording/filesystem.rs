//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::ports::filesystem::{FileSystem, FsError};
use crate::trace::recorder::TraceRecorder;

/// Records filesystem probes while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<TraceRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<TraceRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let mut guard = self.recorder.lock().expect("recorder lock poisoned");
        guard.record("exists", json!({ "path": path.display().to_string() }), json!(result));
        result
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let result = self.inner.read_to_string(path);
        let input = json!({ "path": path.display().to_string() });
        record_result(&self.recorder, "read_to_string", input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::trace::ProbeTrace;

    #[test]
    fn records_exists_and_read_probes() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let source = dir.path().join("Unit.rs");
        std::fs::write(&source, "struct Unit;").unwrap();
        let trace_path = dir.path().join("fs.trace.yaml");

        let recorder = Arc::new(Mutex::new(TraceRecorder::new(&trace_path, "test", "unit")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            assert!(!fs.exists(&dir.path().join("Missing.rs")));
            assert!(fs.exists(&source));
            assert!(fs.read_to_string(&dir.path().join("Missing.rs")).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let trace = ProbeTrace::from_yaml(&std::fs::read_to_string(&trace_path).unwrap()).unwrap();
        let methods: Vec<&str> = trace.probes.iter().map(|p| p.method.as_str()).collect();
        assert_eq!(methods, vec!["exists", "exists", "read_to_string"]);
        assert_eq!(trace.probes[1].output, json!(true));
        assert!(trace.probes[2].output.get("err").is_some());
    }
}
