//! Token command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use mwapi::TokenType;

use super::Context;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Token type (csrf, watch, patrol, rollback, ...)
    #[arg(long = "type", default_value = "csrf")]
    pub token_type: TokenType,
}

pub async fn run(args: TokenArgs, ctx: &Context) -> Result<()> {
    let token = ctx
        .client
        .get_token(args.token_type)
        .await
        .context("Failed to fetch token")?;

    println!("{}", token);

    Ok(())
}
