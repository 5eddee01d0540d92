//! Command dispatch and handlers.

pub mod inflect;
pub mod load;
pub mod namespaces;
pub mod resolve;

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cli::{Command, TableArgs};
use crate::config::{LoaderManifest, NamespaceEntry};
use crate::ports::filesystem::FileSystem;
use crate::resolver::Resolver;
use crate::trace::recorder::TraceRecorder;

/// Dispatch a parsed command to its handler.
///
/// When `SYMLOAD_RECORD` is set to a file path, every filesystem probe is
/// recorded to a trace at that path. When `SYMLOAD_REPLAY` is set, probes
/// are answered from that trace instead of the disk.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let mut stdout = std::io::stdout().lock();

    if let Ok(path) = env::var("SYMLOAD_RECORD") {
        let recorder = Arc::new(Mutex::new(TraceRecorder::new(
            PathBuf::from(path),
            "symload-session",
            command.label(),
        )));
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
        let result = dispatch_with_fs(command, Box::new(fs), &mut stdout);

        // Finish recording after the command completes (even on error)
        finish_recording(recorder)?;
        return result;
    }

    let fs: Box<dyn FileSystem> = match env::var("SYMLOAD_REPLAY") {
        Ok(path) => Box::new(ReplayingFileSystem::from_file(Path::new(&path))?),
        Err(_) => Box::new(LiveFileSystem),
    };
    dispatch_with_fs(command, fs, &mut stdout)
}

/// Dispatch a command using the given filesystem port, writing output to `out`.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_fs(
    command: &Command,
    fs: Box<dyn FileSystem>,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Resolve { symbol, tables } => resolve::run(&build_resolver(tables, fs)?, symbol, out),
        Command::Load { symbols, tables } => load::run(build_resolver(tables, fs)?, symbols, out),
        Command::Namespaces { tables } => namespaces::run(&build_resolver(tables, fs)?, out),
        Command::Plural { word } => inflect::plural(word, out),
        Command::Singular { word } => inflect::singular(word, out),
    }
}

/// Builds a resolver from an optional manifest plus command-line flags.
///
/// Flag registrations are applied after the manifest's.
///
/// # Errors
///
/// Returns an error string if the manifest cannot be read or parsed.
pub fn build_resolver(tables: &TableArgs, fs: Box<dyn FileSystem>) -> Result<Resolver, String> {
    let mut manifest = match &tables.config {
        Some(path) => LoaderManifest::load(fs.as_ref(), path)?,
        None => LoaderManifest::default(),
    };

    if tables.separator.is_some() {
        manifest.separator.clone_from(&tables.separator);
    }
    if tables.extension.is_some() {
        manifest.extension.clone_from(&tables.extension);
    }
    if tables.lenient_overrides {
        manifest.strict_overrides = Some(false);
    }
    manifest.namespaces.extend(tables.namespaces.iter().map(|(prefix, dir)| NamespaceEntry {
        prefix: prefix.clone(),
        dirs: vec![dir.clone()],
        prepend: false,
    }));
    manifest
        .overrides
        .extend(tables.overrides.iter().map(|(symbol, path)| (symbol.clone(), PathBuf::from(path))));

    Ok(manifest.build(fs))
}

/// Finish a recording and report where the trace was written.
fn finish_recording(recorder: Arc<Mutex<TraceRecorder>>) -> Result<(), String> {
    let recorder = Arc::try_unwrap(recorder)
        .map_err(|_| "Recording filesystem still has references".to_string())?
        .into_inner()
        .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
    let path = recorder.finish().map_err(|e| format!("Failed to write probe trace: {e}"))?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}

/// Writes one line to `out`, mapping I/O failures to a command error.
pub(crate) fn emit(out: &mut dyn Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("Failed to write output: {e}"))
}
