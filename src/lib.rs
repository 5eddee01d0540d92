//! Core library entry for `symload`.
//!
//! Two independent pieces live here: the [`resolver`], which maps
//! fully-qualified symbols to source files through namespace prefixes and
//! overrides, and the [`inflector`], which converts nouns between singular
//! and plural form.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod inflector;
pub mod ports;
pub mod resolver;
pub mod trace;

pub use host::{HookStack, HostError, SymbolSource};
pub use resolver::{LoadError, LoadedUnit, Origin, Resolution, Resolver, ResolverOptions};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
