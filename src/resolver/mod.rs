//! Symbol-to-file resolution over registered namespace prefixes.
//!
//! A [`Resolver`] owns two tables:
//!
//! - a namespace table mapping prefixes such as `App.Models.` to an ordered
//!   list of base directories, and
//! - an override table mapping exact symbols to exact files.
//!
//! Lookup order is: override first, then the most specific registered prefix
//! down to the least specific, then each prefix's directories in order. The
//! first existing file wins.

mod error;
mod table;


pub use error::LoadError;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::ports::filesystem::FileSystem;
use table::{normalize_dir, normalize_prefix, NamespaceTable};

/// Namespace separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Source extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "rs";

/// Tunables for a [`Resolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Separator between namespace segments (`.`, `::`, `\\`, ...).
    pub separator: String,
    /// Extension appended to candidate files, without the leading dot.
    pub extension: String,
    /// Treat an override pointing at a missing file as an error instead of
    /// falling back to the namespace search.
    pub strict_overrides: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            strict_overrides: true,
        }
    }
}

/// How a resolved path was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Exact entry in the override table.
    Override,
    /// Directory registered under this normalized prefix.
    Namespace {
        /// The prefix that matched, including its trailing separator.
        prefix: String,
    },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => f.write_str("override"),
            Self::Namespace { prefix } => write!(f, "namespace {prefix}"),
        }
    }
}

/// A candidate file that exists for a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path of the source file.
    pub path: PathBuf,
    /// Which table produced the path.
    pub origin: Origin,
}

/// Record of a symbol that has been loaded.
#[derive(Debug, Clone)]
pub struct LoadedUnit {
    /// The loaded symbol.
    pub symbol: String,
    /// File the symbol was loaded from.
    pub path: PathBuf,
    /// Which table produced the path.
    pub origin: Origin,
    /// Source text read from the file; shared between symbols of one file.
    pub source: Arc<str>,
}

#[derive(Default)]
struct Tables {
    namespaces: NamespaceTable,
    overrides: HashMap<String, PathBuf>,
}

#[derive(Default)]
struct LoadState {
    symbols: HashMap<String, LoadedUnit>,
    files: HashMap<PathBuf, Arc<str>>,
    symbol_claims: HashMap<String, Arc<Mutex<()>>>,
    file_claims: HashMap<PathBuf, Arc<Mutex<()>>>,
}

/// Returns the claim for `key`, creating it on first use.
fn claim<K: Hash + Eq>(claims: &mut HashMap<K, Arc<Mutex<()>>>, key: K) -> Arc<Mutex<()>> {
    Arc::clone(claims.entry(key).or_default())
}

/// Maps fully-qualified symbols to source files and loads each at most once.
///
/// All methods take `&self`; registration and lookups may be interleaved
/// from several threads.
pub struct Resolver {
    options: ResolverOptions,
    fs: Box<dyn FileSystem>,
    tables: RwLock<Tables>,
    loaded: Mutex<LoadState>,
}

impl Resolver {
    /// Creates a resolver with default options.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>) -> Self {
        Self::with_options(fs, ResolverOptions::default())
    }

    /// Creates a resolver with the given options.
    ///
    /// An empty separator has no boundaries to split on and is replaced by
    /// [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn with_options(fs: Box<dyn FileSystem>, mut options: ResolverOptions) -> Self {
        if options.separator.is_empty() {
            tracing::warn!("empty namespace separator, using {DEFAULT_SEPARATOR:?}");
            options.separator = DEFAULT_SEPARATOR.to_string();
        }
        Self {
            options,
            fs,
            tables: RwLock::new(Tables::default()),
            loaded: Mutex::new(LoadState::default()),
        }
    }

    /// Options in effect for this resolver.
    #[must_use]
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Adds a base directory for a namespace prefix.
    ///
    /// With `prepend` the directory is searched before those already
    /// registered for the prefix.
    pub fn add_namespace(&self, prefix: &str, dir: &str, prepend: bool) -> &Self {
        let prefix = normalize_prefix(prefix, &self.options.separator);
        let dir = normalize_dir(dir);
        tracing::debug!(%prefix, %dir, prepend, "registering namespace");
        self.write_tables().namespaces.insert(prefix, dir, prepend);
        self
    }

    /// Appends one base directory per `(prefix, dir)` pair.
    pub fn add_namespaces<I, P, D>(&self, mapping: I) -> &Self
    where
        I: IntoIterator<Item = (P, D)>,
        P: AsRef<str>,
        D: AsRef<str>,
    {
        for (prefix, dir) in mapping {
            self.add_namespace(prefix.as_ref(), dir.as_ref(), false);
        }
        self
    }

    /// Merges exact symbol-to-file entries; later entries replace earlier ones.
    pub fn add_overrides<I, S, P>(&self, mapping: I) -> &Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        let mut tables = self.write_tables();
        for (symbol, path) in mapping {
            tables.overrides.insert(symbol.into(), path.into());
        }
        self
    }

    /// Snapshot of the namespace table in registration order.
    #[must_use]
    pub fn namespaces(&self) -> Vec<(String, Vec<String>)> {
        self.read_tables().namespaces.snapshot()
    }

    /// Snapshot of the override table, sorted by symbol.
    #[must_use]
    pub fn overrides(&self) -> BTreeMap<String, PathBuf> {
        self.read_tables().overrides.iter().map(|(s, p)| (s.clone(), p.clone())).collect()
    }

    /// Finds the file that would be loaded for `symbol`.
    ///
    /// Only existence checks are made; nothing is read. `Ok(None)` means no
    /// override and no registered directory holds a matching file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingOverride`] when strict overrides are on
    /// and the symbol's override file does not exist.
    pub fn resolve(&self, symbol: &str) -> Result<Option<Resolution>, LoadError> {
        let tables = self.read_tables();

        if let Some(path) = tables.overrides.get(symbol) {
            if self.fs.exists(path) {
                tracing::debug!(symbol, path = %path.display(), "resolved via override");
                return Ok(Some(Resolution { path: path.clone(), origin: Origin::Override }));
            }
            if self.options.strict_overrides {
                return Err(LoadError::MissingOverride {
                    symbol: symbol.to_string(),
                    path: path.clone(),
                });
            }
            tracing::warn!(symbol, path = %path.display(), "override file missing, searching namespaces");
        }

        let separator = self.options.separator.as_str();
        let mut remaining = symbol;
        // A separator at position 0 is not a boundary.
        while let Some(pos) = remaining.rfind(separator).filter(|&pos| pos > 0) {
            let split = pos + separator.len();
            let (prefix, relative) = symbol.split_at(split);

            if let Some(dirs) = tables.namespaces.dirs(prefix) {
                for dir in dirs {
                    let candidate = self.candidate_path(dir, relative);
                    let exists = self.fs.exists(&candidate);
                    tracing::debug!(symbol, prefix, path = %candidate.display(), exists, "probed candidate");
                    if exists {
                        return Ok(Some(Resolution {
                            path: candidate,
                            origin: Origin::Namespace { prefix: prefix.to_string() },
                        }));
                    }
                }
            }

            remaining = prefix.trim_end_matches(separator);
        }

        tracing::debug!(symbol, "no candidate found");
        Ok(None)
    }

    /// Resolves `symbol` and reads its file, unless it is already loaded.
    ///
    /// Returns `Ok(true)` when the symbol is loaded after the call and
    /// `Ok(false)` when no candidate exists. A file shared by several
    /// symbols is read only once.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] when the chosen file exists but cannot be
    /// read; the search does not move on to other candidates. Also returns
    /// any error from [`Resolver::resolve`].
    pub fn load(&self, symbol: &str) -> Result<bool, LoadError> {
        let symbol_claim = {
            let mut state = self.state();
            if state.symbols.contains_key(symbol) {
                tracing::debug!(symbol, "already loaded");
                return Ok(true);
            }
            claim(&mut state.symbol_claims, symbol.to_string())
        };
        // Concurrent first loads of one symbol queue here; others proceed.
        let _symbol_guard = symbol_claim.lock().unwrap_or_else(PoisonError::into_inner);
        if self.state().symbols.contains_key(symbol) {
            return Ok(true);
        }

        let Some(Resolution { path, origin }) = self.resolve(symbol)? else {
            return Ok(false);
        };

        let source = self.read_once(symbol, &path)?;

        tracing::info!(symbol, path = %path.display(), %origin, "loaded symbol");
        let mut state = self.state();
        state
            .symbols
            .insert(symbol.to_string(), LoadedUnit { symbol: symbol.to_string(), path, origin, source });
        state.symbol_claims.remove(symbol);
        Ok(true)
    }

    /// Reads `path` unless another symbol already loaded it.
    fn read_once(&self, symbol: &str, path: &Path) -> Result<Arc<str>, LoadError> {
        let file_claim = {
            let mut state = self.state();
            if let Some(source) = state.files.get(path).cloned() {
                return Ok(source);
            }
            claim(&mut state.file_claims, path.to_path_buf())
        };
        let _file_guard = file_claim.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(source) = self.state().files.get(path).cloned() {
            return Ok(source);
        }

        let text = self.fs.read_to_string(path).map_err(|source| LoadError::Read {
            symbol: symbol.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        let text: Arc<str> = Arc::from(text);
        let mut state = self.state();
        state.files.insert(path.to_path_buf(), Arc::clone(&text));
        state.file_claims.remove(path);
        Ok(text)
    }

    /// Returns `true` if `symbol` has been loaded.
    #[must_use]
    pub fn is_loaded(&self, symbol: &str) -> bool {
        self.state().symbols.contains_key(symbol)
    }

    /// Returns the record of a loaded symbol.
    #[must_use]
    pub fn loaded(&self, symbol: &str) -> Option<LoadedUnit> {
        self.state().symbols.get(symbol).cloned()
    }

    fn candidate_path(&self, dir: &str, relative: &str) -> PathBuf {
        let relative = relative.replace(self.options.separator.as_str(), "/");
        let mut path = format!("{dir}{relative}");
        if !self.options.extension.is_empty() {
            path.push('.');
            path.push_str(&self.options.extension);
        }
        PathBuf::from(path)
    }

    // Poisoning is recovered from: entries are only inserted once a load
    // has fully succeeded, so a panicking adapter leaves no partial state.
    fn state(&self) -> MutexGuard<'_, LoadState> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}
