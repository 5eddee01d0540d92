//! Adapters implementing the port traits.
//!
//! - `live`: real disk I/O.
//! - `recording`: wraps another adapter and writes every probe to a trace.
//! - `replaying`: answers probes from a previously recorded trace.

pub mod live;
pub mod recording;
pub mod replaying;
