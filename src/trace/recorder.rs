//! Records probes into a trace file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Probe, ProbeTrace};

/// Collects probes and writes them as a YAML trace file.
#[derive(Debug)]
pub struct TraceRecorder {
    path: PathBuf,
    name: String,
    label: String,
    probes: Vec<Probe>,
    next_seq: u64,
}

impl TraceRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            label: label.into(),
            probes: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record a probe. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.probes.push(Probe { seq: self.next_seq, method: method.into(), input, output });
        self.next_seq += 1;
    }

    /// Number of probes recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Finish recording and write the trace YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let trace = ProbeTrace {
            name: self.name,
            recorded_at: Utc::now(),
            label: self.label,
            probes: self.probes,
        };
        let yaml = serde_yaml::to_string(&trace).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
