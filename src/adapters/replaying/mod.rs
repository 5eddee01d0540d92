//! Replaying adapters that answer probes from a recorded trace.

pub mod filesystem;

pub use filesystem::ReplayingFileSystem;
