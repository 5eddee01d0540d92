//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_symload(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_symload");
    Command::new(bin)
        .args(args)
        .env_remove("SYMLOAD_RECORD")
        .env_remove("SYMLOAD_REPLAY")
        .output()
        .expect("failed to run symload binary")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn plural_and_singular_subcommands() {
    let output = run_symload(&["plural", "party"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "parties\n");

    let output = run_symload(&["singular", "buses"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "bus\n");
}

#[test]
fn resolve_prefers_most_specific_namespace() {
    let dir = tempfile::tempdir().expect("create tempdir");
    write(dir.path(), "app/Models/User.rs", "");
    write(dir.path(), "models/User.rs", "");
    let app = dir.path().join("app");
    let models = dir.path().join("models");

    let output = run_symload(&[
        "resolve",
        "App.Models.User",
        "-n",
        &format!("App={}", app.display()),
        "-n",
        &format!("App.Models={}", models.display()),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("models/User.rs (namespace App.Models.)"), "stdout: {stdout}");
}

#[test]
fn resolve_unknown_symbol_fails_descriptively() {
    let output = run_symload(&["resolve", "Nowhere.Thing"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("symbol 'Nowhere.Thing' not found"));
}

#[test]
fn load_reads_manifest_and_loads_once() {
    let dir = tempfile::tempdir().expect("create tempdir");
    write(dir.path(), "src/Cart.rs", "struct Cart;");
    let manifest = dir.path().join("symload.yaml");
    std::fs::write(
        &manifest,
        format!(
            "namespaces:\n  - prefix: Shop\n    dirs: ['{}']\n",
            dir.path().join("src").display()
        ),
    )
    .unwrap();

    let output =
        run_symload(&["load", "Shop.Cart", "Shop.Cart", "-c", &manifest.display().to_string()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("loaded Shop.Cart from "));
    assert_eq!(lines[1], "already loaded Shop.Cart");
}

#[test]
fn namespaces_lists_tables() {
    let output = run_symload(&["namespaces", "-n", "App=src", "-o", "App.Legacy=legacy.rs"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout, "App. -> src/\nApp.Legacy => legacy.rs\n");
}

#[test]
fn malformed_namespace_flag_is_rejected() {
    let output = run_symload(&["namespaces", "-n", "App"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("PREFIX=DIR") || stderr.contains("KEY=VALUE"));
}

fn run_symload_with_env(args: &[&str], key: &str, value: &Path) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_symload");
    Command::new(bin)
        .args(args)
        .env_remove("SYMLOAD_RECORD")
        .env_remove("SYMLOAD_REPLAY")
        .env(key, value)
        .output()
        .expect("failed to run symload binary")
}

#[test]
fn recorded_session_replays_and_divergence_fails() {
    let dir = tempfile::tempdir().expect("create tempdir");
    write(dir.path(), "src/Cart.rs", "struct Cart;");
    let trace = dir.path().join("load.trace.yaml");
    let namespace = format!("Shop={}", dir.path().join("src").display());

    let recorded = run_symload_with_env(&["load", "Shop.Cart", "-n", &namespace], "SYMLOAD_RECORD", &trace);
    assert!(recorded.status.success(), "stderr: {}", String::from_utf8_lossy(&recorded.stderr));
    assert!(String::from_utf8_lossy(&recorded.stderr).contains("Recording saved to:"));
    assert!(trace.exists());

    // Replay must be served from the trace, not the disk.
    std::fs::remove_file(dir.path().join("src/Cart.rs")).unwrap();

    let replayed = run_symload_with_env(&["load", "Shop.Cart", "-n", &namespace], "SYMLOAD_REPLAY", &trace);
    assert!(replayed.status.success(), "stderr: {}", String::from_utf8_lossy(&replayed.stderr));
    assert_eq!(
        String::from_utf8_lossy(&replayed.stdout),
        String::from_utf8_lossy(&recorded.stdout)
    );

    let diverged = run_symload_with_env(&["load", "Shop.Other", "-n", &namespace], "SYMLOAD_REPLAY", &trace);
    let stderr = String::from_utf8_lossy(&diverged.stderr);
    assert!(!diverged.status.success());
    assert!(!String::from_utf8_lossy(&diverged.stdout).contains("loaded Shop.Other"));
    assert!(stderr.contains("Trace diverged"), "stderr: {stderr}");
}
