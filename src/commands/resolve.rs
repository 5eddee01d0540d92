//! `symload resolve` command.

use std::io::Write;

use super::emit;
use crate::host::HostError;
use crate::resolver::Resolver;

/// Execute the `resolve` command.
///
/// # Errors
///
/// Returns an error string if the symbol cannot be resolved.
pub fn run(resolver: &Resolver, symbol: &str, out: &mut dyn Write) -> Result<(), String> {
    match resolver.resolve(symbol).map_err(|e| e.to_string())? {
        Some(resolution) => emit(
            out,
            &format!("{} ({})", resolution.path.display(), resolution.origin),
        ),
        None => Err(HostError::SymbolNotFound { symbol: symbol.to_string() }.to_string()),
    }
}
