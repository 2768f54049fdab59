//! Command implementations.

pub mod config;
pub mod log;
pub mod page;
pub mod request;
pub mod site_time;
pub mod token;

use anyhow::{Context as _, Result, bail};
use tracing::debug;

use mwapi::{ApiClient, ErrorReporter, SessionOptions};

use crate::cli::Commands;
use crate::config::Settings;

/// Everything a command needs: the resolved settings and the one client
/// built for this process.
pub struct Context {
    pub settings: Settings,
    pub client: ApiClient,
}

impl Context {
    /// Build the process-wide client from resolved settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let options = SessionOptions {
            timeout: settings.timeout,
            user_agent: Some(env!("MWAPI_USER_AGENT").to_string()),
        };
        let session = settings
            .authorization
            .session_with(&settings.api_url, options)
            .context("Failed to create API session")?;

        let client = ApiClient::builder(session)
            .reporter(ErrorReporter::new(&settings.logs_dir))
            .build();
        debug!(
            api = %settings.api_url,
            logs_dir = %settings.logs_dir.display(),
            "API client ready"
        );

        Ok(Self { settings, client })
    }
}

pub async fn handle(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Token(args) => token::run(args, ctx).await,
        Commands::Get(args) => request::run_get(args, ctx).await,
        Commands::Post(args) => request::run_post(args, ctx).await,
        Commands::Page(args) => page::run(args, ctx).await,
        Commands::SiteTime(args) => site_time::run(args, ctx).await,
        Commands::LogWiki(args) => log::run_wiki(args, ctx).await,
        Commands::LogLocal(args) => log::run_local(args, ctx).await,
        Commands::Config(_) => bail!("config commands run without an API client"),
    }
}
