//! `symload namespaces` command.

use std::io::Write;

use super::emit;
use crate::resolver::Resolver;

/// Execute the `namespaces` command.
///
/// # Errors
///
/// Returns an error string if output cannot be written.
pub fn run(resolver: &Resolver, out: &mut dyn Write) -> Result<(), String> {
    for (prefix, dirs) in resolver.namespaces() {
        emit(out, &format!("{prefix} -> {}", dirs.join(", ")))?;
    }
    for (symbol, path) in resolver.overrides() {
        emit(out, &format!("{symbol} => {}", path.display()))?;
    }
    Ok(())
}
