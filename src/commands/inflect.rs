//! `symload plural` and `symload singular` commands.

use std::io::Write;

use super::emit;
use crate::inflector;

/// Execute the `plural` command.
///
/// # Errors
///
/// Returns an error string if output cannot be written.
pub fn plural(word: &str, out: &mut dyn Write) -> Result<(), String> {
    emit(out, &inflector::plural(word))
}

/// Execute the `singular` command.
///
/// # Errors
///
/// Returns an error string if output cannot be written.
pub fn singular(word: &str, out: &mut dyn Write) -> Result<(), String> {
    emit(out, &inflector::singular(word))
}
