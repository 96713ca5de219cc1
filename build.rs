use std::{env, process::Command};

const SHA_VAR: &str = "USERBOARD_GIT_SHA";

/// `git describe` output for the working tree, with a `-dirty` suffix when
/// there are uncommitted changes.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed={SHA_VAR}");
    // Baked into the binary through `option_env!` in `AppConfig::load`.
    println!("cargo:rerun-if-env-changed=USERBOARD_API_BASE");
    println!("cargo:rerun-if-env-changed=USERBOARD_ORIGIN");

    // Source tarballs have no `.git`; packagers pass the revision in.
    let revision = env::var(SHA_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={SHA_VAR}={revision}");
}
