//! Embeds the release version and the HTTP User-Agent into the binary.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");
    println!("cargo:rerun-if-env-changed=MWAPI_BUILD_VERSION");

    // Packagers building from a tarball pin the version explicitly.
    let version = env::var("MWAPI_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe_head)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    // Wikimedia asks API clients to identify themselves with a contact URL.
    let user_agent = match env::var("CARGO_PKG_REPOSITORY") {
        Ok(repository) if !repository.is_empty() => {
            format!("mwapi-cli/{} (+{})", version, repository)
        }
        _ => format!("mwapi-cli/{}", version),
    };

    println!("cargo:rustc-env=MWAPI_VERSION={}", version);
    println!("cargo:rustc-env=MWAPI_USER_AGENT={}", user_agent);
}

/// `git describe` of the checkout, without a leading `v`.
fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim().trim_start_matches('v');
    (!described.is_empty()).then(|| described.to_string())
}
