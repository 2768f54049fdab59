//! CLI argument definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands::{
    config::ConfigCommand, log::LogLocalArgs, log::LogWikiArgs, page::PageArgs,
    request::GetArgs, request::PostArgs, site_time::SiteTimeArgs, token::TokenArgs,
};

/// Signed MediaWiki API requests from the command line.
#[derive(Parser, Debug)]
#[command(name = "mwapi")]
#[command(author, version = env!("MWAPI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings. Each falls back to the config file when unset.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, env = "MWAPI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API endpoint, e.g. https://test.wikipedia.org/w/api.php
    #[arg(long, env = "MWAPI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Article base URL, e.g. https://test.wikipedia.org/wiki/
    #[arg(long, env = "MWAPI_ARTICLE_URL", global = true)]
    pub article_url: Option<String>,

    /// OAuth consumer key
    #[arg(long, env = "MWAPI_CLIENT_KEY", global = true, hide_env_values = true)]
    pub client_key: Option<String>,

    /// OAuth consumer secret
    #[arg(long, env = "MWAPI_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth access token key
    #[arg(long, env = "MWAPI_ACCESS_KEY", global = true, hide_env_values = true)]
    pub access_key: Option<String>,

    /// OAuth access token secret
    #[arg(long, env = "MWAPI_ACCESS_SECRET", global = true, hide_env_values = true)]
    pub access_secret: Option<String>,

    /// Directory for diagnostics and local logs
    #[arg(long, env = "MWAPI_LOGS_DIR", global = true)]
    pub logs_dir: Option<PathBuf>,

    /// Title prefix for on-wiki log pages
    #[arg(long, env = "MWAPI_LOG_PREFIX", global = true)]
    pub log_prefix: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MWAPI_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl GlobalArgs {
    /// Returns the config file to read: the explicit one or the default.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => crate::config::default_config_path(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch an action token
    Token(TokenArgs),

    /// Send a GET request
    Get(GetArgs),

    /// Send a token-authorized POST request
    Post(PostArgs),

    /// Show a page reference, optionally requiring that it exists
    Page(PageArgs),

    /// Show the wiki's server time
    SiteTime(SiteTimeArgs),

    /// Append an event to an on-wiki log page
    LogWiki(LogWikiArgs),

    /// Append a page's title and URL to a local log file
    LogLocal(LogLocalArgs),

    /// Inspect or write the config file
    Config(ConfigCommand),
}
