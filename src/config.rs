//! Loader manifest: a YAML description of a resolver's tables.
//!
//! ```yaml
//! separator: "."
//! extension: rs
//! strict_overrides: true
//! namespaces:
//!   - prefix: App.Models
//!     dirs: [src/models]
//! overrides:
//!   App.Legacy.Thing: legacy/thing.rs
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ports::filesystem::FileSystem;
use crate::resolver::{Resolver, ResolverOptions};

/// One namespace prefix and the directories to register under it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceEntry {
    /// Namespace prefix, with or without surrounding separators.
    pub prefix: String,
    /// Base directories, searched in the order listed.
    #[serde(default)]
    pub dirs: Vec<String>,
    /// Put these directories in front of any already registered.
    #[serde(default)]
    pub prepend: bool,
}

/// Parsed loader manifest. Missing fields take the resolver defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoaderManifest {
    /// Namespace separator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Source file extension, without the leading dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Whether a missing override file is an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_overrides: Option<bool>,
    /// Namespace registrations, applied in order.
    #[serde(default)]
    pub namespaces: Vec<NamespaceEntry>,
    /// Exact symbol-to-file overrides.
    #[serde(default)]
    pub overrides: IndexMap<String, PathBuf>,
}

impl LoaderManifest {
    /// Parses a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("Failed to parse loader manifest: {e}"))
    }

    /// Reads and parses a manifest through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, String> {
        let text = fs
            .read_to_string(path)
            .map_err(|e| format!("Failed to read loader manifest {}: {e}", path.display()))?;
        Self::from_yaml(&text).map_err(|e| format!("{e} ({})", path.display()))
    }

    /// Resolver options with manifest values laid over the defaults.
    #[must_use]
    pub fn options(&self) -> ResolverOptions {
        let defaults = ResolverOptions::default();
        ResolverOptions {
            separator: self.separator.clone().unwrap_or(defaults.separator),
            extension: self.extension.clone().unwrap_or(defaults.extension),
            strict_overrides: self.strict_overrides.unwrap_or(defaults.strict_overrides),
        }
    }

    /// Registers this manifest's namespaces and overrides on `resolver`.
    pub fn apply(&self, resolver: &Resolver) {
        for entry in &self.namespaces {
            let mut dirs: Vec<&String> = entry.dirs.iter().collect();
            // Prepending one by one would reverse the listed order.
            if entry.prepend {
                dirs.reverse();
            }
            for dir in dirs {
                resolver.add_namespace(&entry.prefix, dir, entry.prepend);
            }
        }
        resolver.add_overrides(self.overrides.iter().map(|(s, p)| (s.clone(), p.clone())));
    }

    /// Builds a resolver over `fs` with this manifest's options and tables.
    #[must_use]
    pub fn build(&self, fs: Box<dyn FileSystem>) -> Resolver {
        let resolver = Resolver::with_options(fs, self.options());
        self.apply(&resolver);
        resolver
    }
}
