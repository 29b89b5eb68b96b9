//! Stamps the portal-search binary with the revision it was built from
//!
//! `GIT_HASH`, `BUILD_TIMESTAMP` (UTC) and `BUILD_PROFILE` end up in the
//! startup log line.

use std::process::Command;

fn main() {
    let revision = git_revision().unwrap_or_else(|| "unknown".to_string());
    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    set_env("GIT_HASH", &revision);
    set_env("BUILD_TIMESTAMP", &built_at);
    set_env("BUILD_PROFILE", &profile);

    // Restamp when sources or the checked-out commit change
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}

/// Short commit hash, suffixed with `-dirty` for uncommitted changes
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    Some(revision.trim().to_string())
}

fn set_env(name: &str, value: &str) {
    println!("cargo:rustc-env={}={}", name, value);
}
