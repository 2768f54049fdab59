//! Config command implementations.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::{debug, warn};

use crate::cli::GlobalArgs;
use crate::config::{self, FileConfig};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration (secrets hidden)
    Show,

    /// Write the current flags and environment to the config file
    Init,
}

pub fn run(cmd: ConfigCommand, args: &GlobalArgs) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Path => {
            println!("{}", args.config_path()?.display());
        }
        ConfigSubcommand::Show => {
            let merged = config::load_for(args)?.overlay(args);
            output::json_pretty(&redacted(merged))?;
        }
        ConfigSubcommand::Init => {
            let path = args.config_path()?;
            init(&path, args)?;
            output::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

/// Lay `args` over the existing file and write the result back.
///
/// An unreadable file is replaced rather than blocking the rewrite.
fn init(path: &Path, args: &GlobalArgs) -> Result<()> {
    let existing = match config::load(path) {
        Ok(existing) => existing,
        Err(e) => {
            let reason = format!("{:#}", e);
            warn!(error = %reason, "replacing unreadable config file");
            FileConfig::default()
        }
    };

    config::save(path, &existing.overlay(args))?;
    debug!(path = %path.display(), "config written");
    Ok(())
}

fn redacted(mut config: FileConfig) -> FileConfig {
    let hide = |s: Option<String>| s.map(|_| "[REDACTED]".to_string());
    config.client_secret = hide(config.client_secret);
    config.access_secret = hide(config.access_secret);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_hides_secrets() {
        let config = FileConfig {
            client_key: Some("ck".to_string()),
            client_secret: Some("cs-value".to_string()),
            access_secret: Some("as-value".to_string()),
            ..FileConfig::default()
        };
        let shown = redacted(config);
        assert_eq!(shown.client_key.as_deref(), Some("ck"));
        assert_eq!(shown.client_secret.as_deref(), Some("[REDACTED]"));
        assert_eq!(shown.access_secret.as_deref(), Some("[REDACTED]"));
    }

    #[test]
    fn init_replaces_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let args = GlobalArgs {
            api_url: Some("https://test.wikipedia.org/w/api.php".to_string()),
            ..GlobalArgs::default()
        };
        init(&path, &args).unwrap();

        let reloaded = config::load(&path).unwrap();
        assert_eq!(reloaded.api_url, args.api_url);
    }
}
