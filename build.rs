use std::env;
use std::process::Command;

fn main() {
    for watched in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let hash = run("git", &["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty());
    let tree = run("git", &["status", "--porcelain"])
        .map(|changes| (if changes.is_empty() { "clean" } else { "dirty" }).to_string());
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let values = [
        ("HASH", hash),
        ("STATUS", tree),
        ("TIMESTAMP", Some(built_at)),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", run("rustc", &["--version"])),
    ];
    for (key, value) in values {
        let value = value.unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env=STERDIARY_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command.
fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
