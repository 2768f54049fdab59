//! Log command implementations.

use anyhow::{Context as _, Result};
use clap::Args;

use mwapi::{LocalLog, OnWikiLog, Page};

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogWikiArgs {
    /// Log page name, appended to the configured prefix
    pub page: String,

    /// Text to append
    pub event: String,

    /// Edit summary
    #[arg(long)]
    pub summary: Option<String>,
}

#[derive(Args, Debug)]
pub struct LogLocalArgs {
    /// Page title to record
    pub title: String,

    /// File name inside the logs directory
    pub file: String,

    /// Namespace number
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub ns: i32,
}

pub async fn run_wiki(args: LogWikiArgs, ctx: &Context) -> Result<()> {
    let mut log = OnWikiLog::new(ctx.client.clone(), &ctx.settings.log_prefix);
    if let Some(summary) = args.summary {
        log = log.with_summary(summary);
    }

    log.append(&args.event, &args.page)
        .await
        .context("Failed to append to on-wiki log")?;

    output::success(&format!("Appended to {}", log.log_title(&args.page)));

    Ok(())
}

pub async fn run_local(args: LogLocalArgs, ctx: &Context) -> Result<()> {
    let log = LocalLog::new(&ctx.settings.logs_dir, ctx.settings.article_url.clone());
    let page = Page::new(args.title, args.ns);

    log.append(&page, &args.file)
        .await
        .with_context(|| format!("Failed to append to {}", args.file))?;

    output::success(&format!("Logged {}", page));

    Ok(())
}
