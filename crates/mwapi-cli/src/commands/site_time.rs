//! Site-time command implementation.

use anyhow::{Context as _, Result};
use chrono::SecondsFormat;
use clap::Args;

use super::Context;

#[derive(Args, Debug)]
pub struct SiteTimeArgs {}

pub async fn run(_args: SiteTimeArgs, ctx: &Context) -> Result<()> {
    let time = ctx
        .client
        .site_time()
        .await
        .context("Failed to read server time")?;

    println!("{}", time.to_rfc3339_opts(SecondsFormat::Secs, true));

    Ok(())
}
