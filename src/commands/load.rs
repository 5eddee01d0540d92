//! `symload load` command.

use std::io::Write;
use std::sync::Arc;

use super::emit;
use crate::host::{HookStack, SymbolSource};
use crate::resolver::Resolver;

/// Execute the `load` command.
///
/// Symbols are required through a [`HookStack`] holding the resolver, the
/// same way a host would ask for them.
///
/// # Errors
///
/// Returns an error string on the first symbol that cannot be loaded.
pub fn run(resolver: Resolver, symbols: &[String], out: &mut dyn Write) -> Result<(), String> {
    let resolver = Arc::new(resolver);
    let stack = HookStack::new();
    let source: Arc<dyn SymbolSource> = Arc::clone(&resolver) as Arc<dyn SymbolSource>;
    stack.register(Arc::clone(&source), false);

    for symbol in symbols {
        if resolver.is_loaded(symbol) {
            emit(out, &format!("already loaded {symbol}"))?;
            continue;
        }
        stack.require(symbol).map_err(|e| e.to_string())?;
        if let Some(unit) = resolver.loaded(symbol) {
            emit(out, &format!("loaded {symbol} from {}", unit.path.display()))?;
        }
    }

    stack.unregister(&source);
    Ok(())
}
