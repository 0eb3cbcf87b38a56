use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| UNKNOWN.to_string());
    let status = match command_output("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => UNKNOWN,
    };
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let rustc = command_output("rustc", &["--version"]).unwrap_or_else(|| UNKNOWN.to_string());

    emit("HASH", &hash);
    emit("STATUS", status);
    emit("TIMESTAMP", &timestamp);
    emit("TARGET", &env::var("TARGET").unwrap_or_else(|_| UNKNOWN.into()));
    emit("PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into()));
    emit("RUSTC", &rustc);
}

fn emit(name: &str, value: &str) {
    println!("cargo:rustc-env=SPENDLOG_BUILD_{name}={value}");
}

/// Trimmed stdout of a successful command. `Some("")` means it ran and
/// printed nothing.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
