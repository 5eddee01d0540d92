//! Replays recorded probes from a trace.

use std::collections::{HashMap, VecDeque};

use super::format::{Probe, ProbeTrace};

/// Serves probes from a loaded trace, in recorded order per method.
pub struct TraceReplayer {
    queues: HashMap<String, VecDeque<Probe>>,
}

impl TraceReplayer {
    /// Create a new replayer from a loaded trace.
    #[must_use]
    pub fn new(trace: &ProbeTrace) -> Self {
        let mut queues: HashMap<String, VecDeque<Probe>> = HashMap::new();
        for probe in &trace.probes {
            queues.entry(probe.method.clone()).or_default().push_back(probe.clone());
        }
        Self { queues }
    }

    /// Return the next probe recorded for `method`.
    ///
    /// # Panics
    ///
    /// Panics if the trace has no (more) probes for the method. Replay that
    /// diverges from the recording is a test bug, not a runtime condition.
    pub fn next_probe(&mut self, method: &str) -> Probe {
        let Some(queue) = self.queues.get_mut(method) else {
            let mut available: Vec<&str> = self.queues.keys().map(String::as_str).collect();
            available.sort_unstable();
            panic!(
                "Trace exhausted: no probes recorded for method={method:?}. \
                 Recorded methods: [{}]",
                available.join(", ")
            );
        };
        match queue.pop_front() {
            Some(probe) => probe,
            None => panic!("Trace exhausted: all probes for method={method:?} have been consumed"),
        }
    }

    /// Number of probes not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
