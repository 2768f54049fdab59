//! Raw GET and POST command implementations.

use anyhow::{Context as _, Result, bail};
use clap::Args;

use mwapi::{RequestParams, TokenType};

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Request parameters as key=value pairs
    #[arg(value_parser = parse_key_val, required = true)]
    pub params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Request parameters as key=value pairs
    #[arg(value_parser = parse_key_val, required = true)]
    pub params: Vec<(String, String)>,

    /// Token type to authorize the request with
    #[arg(long, default_value = "csrf")]
    pub token_type: TokenType,
}

pub async fn run_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let params: RequestParams = args.params.into_iter().collect();
    let data = ctx.client.get(&params).await.context("GET request failed")?;
    output::json_pretty(&data)
}

pub async fn run_post(args: PostArgs, ctx: &Context) -> Result<()> {
    let params: RequestParams = args.params.into_iter().collect();
    let data = ctx
        .client
        .post_with_token(&params, args.token_type)
        .await
        .context("POST request failed")?;
    output::json_pretty(&data)
}

/// Parse a `key=value` argument.
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("expected key=value, got '{}'", s);
    };
    if key.is_empty() {
        bail!("empty key in '{}'", s);
    }
    Ok((key.to_string(), value.to_string()))
}
