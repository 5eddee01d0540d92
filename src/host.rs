//! Host-side hook stack that asks registered sources to supply symbols.
//!
//! A host keeps an ordered list of [`SymbolSource`]s and consults them one
//! by one whenever it meets a symbol it has no definition for. A source
//! answering `false` lets the next one try.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::resolver::{LoadError, Resolver};

/// Something that can make a symbol available on demand.
pub trait SymbolSource: Send + Sync {
    /// Attempts to load `symbol`, returning whether it is now available.
    ///
    /// # Errors
    ///
    /// Returns an error when a source was found but could not be loaded.
    fn load(&self, symbol: &str) -> Result<bool, LoadError>;
}

impl SymbolSource for Resolver {
    fn load(&self, symbol: &str) -> Result<bool, LoadError> {
        Resolver::load(self, symbol)
    }
}

/// Failure to make a required symbol available.
#[derive(Debug, Error)]
pub enum HostError {
    /// Every registered source declined the symbol.
    #[error("symbol '{symbol}' not found in any registered source")]
    SymbolNotFound {
        /// The requested symbol.
        symbol: String,
    },
    /// A source found the symbol but failed to load it.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Ordered stack of symbol sources.
#[derive(Default)]
pub struct HookStack {
    sources: RwLock<Vec<Arc<dyn SymbolSource>>>,
}

impl HookStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source to the end of the stack, or to the front with `prepend`.
    ///
    /// Registering a source that is already present does nothing.
    pub fn register(&self, source: Arc<dyn SymbolSource>, prepend: bool) -> &Self {
        let mut sources = self.sources.write().expect("hook stack lock poisoned");
        if sources.iter().any(|s| Arc::ptr_eq(s, &source)) {
            return self;
        }
        if prepend {
            sources.insert(0, source);
        } else {
            sources.push(source);
        }
        self
    }

    /// Removes a source by identity. Returns `true` if it was registered.
    pub fn unregister(&self, source: &Arc<dyn SymbolSource>) -> bool {
        let mut sources = self.sources.write().expect("hook stack lock poisoned");
        let before = sources.len();
        sources.retain(|s| !Arc::ptr_eq(s, source));
        sources.len() != before
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.read().expect("hook stack lock poisoned").len()
    }

    /// Returns `true` when no source is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Asks each source in order for `symbol`, stopping at the first success.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::SymbolNotFound`] when every source declines and
    /// [`HostError::Load`] as soon as a source fails to load.
    pub fn require(&self, symbol: &str) -> Result<(), HostError> {
        // Snapshot so a source may touch the stack while loading.
        let sources = self.sources.read().expect("hook stack lock poisoned").clone();
        for source in &sources {
            if source.load(symbol)? {
                return Ok(());
            }
        }
        Err(HostError::SymbolNotFound { symbol: symbol.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Source that knows a fixed set of symbols and logs every request.
    struct Fixed {
        name: &'static str,
        known: &'static [&'static str],
        log: Arc<Mutex<Vec<String>>>,
    }

    impl SymbolSource for Fixed {
        fn load(&self, symbol: &str) -> Result<bool, LoadError> {
            self.log.lock().unwrap().push(format!("{}:{symbol}", self.name));
            Ok(self.known.contains(&symbol))
        }
    }

    fn fixed(
        name: &'static str,
        known: &'static [&'static str],
        log: &Arc<Mutex<Vec<String>>>,
    ) -> Arc<dyn SymbolSource> {
        Arc::new(Fixed { name, known, log: Arc::clone(log) })
    }

    #[test]
    fn later_source_is_tried_when_earlier_declines() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = HookStack::new();
        stack.register(fixed("a", &[], &log), false).register(fixed("b", &["X"], &log), false);

        stack.require("X").unwrap();
        assert_eq!(*log.lock().unwrap(), ["a:X", "b:X"]);
    }

    #[test]
    fn prepended_source_runs_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = HookStack::new();
        stack.register(fixed("a", &["X"], &log), false).register(fixed("b", &["X"], &log), true);

        stack.require("X").unwrap();
        assert_eq!(*log.lock().unwrap(), ["b:X"]);
    }

    #[test]
    fn unknown_symbol_has_descriptive_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = HookStack::new();
        stack.register(fixed("a", &[], &log), false);

        let err = stack.require("App.Missing").unwrap_err();
        assert_eq!(err.to_string(), "symbol 'App.Missing' not found in any registered source");
    }

    #[test]
    fn unregister_removes_by_identity() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let source = fixed("a", &["X"], &log);
        let stack = HookStack::new();
        stack.register(Arc::clone(&source), false).register(Arc::clone(&source), false);
        assert_eq!(stack.len(), 1);

        assert!(stack.unregister(&source));
        assert!(!stack.unregister(&source));
        assert!(stack.is_empty());
        assert!(matches!(stack.require("X"), Err(HostError::SymbolNotFound { .. })));
    }
}
