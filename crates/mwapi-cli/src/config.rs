//! Settings resolution: flags and environment first, then the config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use mwapi::{ApiUrl, Authorization};

use crate::cli::GlobalArgs;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Default title prefix for on-wiki logs.
pub const DEFAULT_LOG_PREFIX: &str = "User:mwapi/logs/";

/// Contents of the config file. Every field is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Returns `args` laid over `self`: values given on the command line or
    /// in the environment win.
    pub fn overlay(self, args: &GlobalArgs) -> FileConfig {
        FileConfig {
            api_url: args.api_url.clone().or(self.api_url),
            article_url: args.article_url.clone().or(self.article_url),
            client_key: args.client_key.clone().or(self.client_key),
            client_secret: args.client_secret.clone().or(self.client_secret),
            access_key: args.access_key.clone().or(self.access_key),
            access_secret: args.access_secret.clone().or(self.access_secret),
            logs_dir: args.logs_dir.clone().or(self.logs_dir),
            log_prefix: args.log_prefix.clone().or(self.log_prefix),
            timeout_secs: args.timeout_secs.or(self.timeout_secs),
        }
    }
}

/// Get the default config file path.
pub fn default_config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "mwapi").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("config.json"))
}

/// Load the config file for this run.
///
/// An explicit `--config` file must load. When the default location cannot
/// be determined the config is empty and every setting has to come from
/// flags or the environment.
pub fn load_for(args: &GlobalArgs) -> Result<FileConfig> {
    if let Some(path) = &args.config {
        return load(path);
    }

    match default_config_path() {
        Ok(path) => load(&path),
        Err(e) => {
            debug!(error = %e, "no default config location");
            Ok(FileConfig::default())
        }
    }
}

/// Load the config file; a missing file is an empty config.
pub fn load(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Write the config file with owner-only permissions.
pub fn save(path: &Path, config: &FileConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, &json).context("Failed to write config file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: ApiUrl,
    pub article_url: Url,
    pub authorization: Authorization,
    pub logs_dir: PathBuf,
    pub log_prefix: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Resolve settings from arguments, environment and config file.
    pub fn resolve(args: &GlobalArgs, file: FileConfig) -> Result<Self> {
        let merged = file.overlay(args);

        let api_url = merged
            .api_url
            .context("No API URL. Pass --api-url or set MWAPI_API_URL")?;
        let api_url = ApiUrl::new(&api_url).context("Invalid API URL")?;

        let article_url = match merged.article_url {
            Some(url) => Url::parse(&url).context("Invalid article URL")?,
            None => api_url
                .as_url()
                .join("/wiki/")
                .context("Could not derive article URL from API URL")?,
        };

        let authorization = Authorization::new(
            required(merged.client_key, "client-key", "MWAPI_CLIENT_KEY")?,
            required(merged.client_secret, "client-secret", "MWAPI_CLIENT_SECRET")?,
            required(merged.access_key, "access-key", "MWAPI_ACCESS_KEY")?,
            required(merged.access_secret, "access-secret", "MWAPI_ACCESS_SECRET")?,
        );

        Ok(Self {
            api_url,
            article_url,
            authorization,
            logs_dir: merged
                .logs_dir
                .unwrap_or_else(|| PathBuf::from(mwapi::diagnostics::DEFAULT_DIAGNOSTICS_DIR)),
            log_prefix: merged
                .log_prefix
                .unwrap_or_else(|| DEFAULT_LOG_PREFIX.to_string()),
            timeout: merged.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn required(value: Option<String>, flag: &str, env: &str) -> Result<String> {
    value.with_context(|| format!("Missing credential. Pass --{} or set {}", flag, env))
}
