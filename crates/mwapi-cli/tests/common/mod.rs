use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI with an isolated HOME/config and dummy credentials.
///
/// `api_url` is passed through `MWAPI_API_URL`; every other setting comes
/// from `args` so tests never read a developer's real config.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mwapi"));
    cmd.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("MWAPI_") {
            cmd.env_remove(key);
        }
    }
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("MWAPI_API_URL", api_url);
    cmd.env("MWAPI_CLIENT_KEY", "client-key");
    cmd.env("MWAPI_CLIENT_SECRET", "client-secret");
    cmd.env("MWAPI_ACCESS_KEY", "access-key");
    cmd.env("MWAPI_ACCESS_SECRET", "access-secret");
    cmd.env("MWAPI_LOGS_DIR", home.join("logs"));
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
