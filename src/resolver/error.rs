//! Errors surfaced while loading a resolved symbol.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::filesystem::FsError;

/// A load that went wrong after a candidate was chosen.
///
/// A symbol that simply has no matching file is not an error; that is
/// reported as `None` / `false` by the resolver.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The candidate file exists but could not be read.
    #[error("failed to load '{symbol}' from {}: {source}", .path.display())]
    Read {
        /// Symbol being loaded.
        symbol: String,
        /// File that failed to load.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: FsError,
    },
    /// A strict override names a file that does not exist.
    #[error("override for '{symbol}' points at missing file {}", .path.display())]
    MissingOverride {
        /// Symbol with the override entry.
        symbol: String,
        /// Path named by the override.
        path: PathBuf,
    },
}
