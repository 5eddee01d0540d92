//! Probe traces for recording and replaying filesystem lookups.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Probe, ProbeTrace};
pub use recorder::TraceRecorder;
pub use replayer::TraceReplayer;
