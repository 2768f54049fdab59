//! Page command implementation.

use anyhow::Result;
use clap::Args;

use super::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page title
    pub title: String,

    /// Namespace number
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub ns: i32,

    /// Fail unless the page exists
    #[arg(long)]
    pub must_exist: bool,
}

pub async fn run(args: PageArgs, ctx: &Context) -> Result<()> {
    let page = ctx
        .client
        .get_page(&args.title, args.ns, args.must_exist)
        .await?;

    let mut rows = vec![
        ("Title", page.full_title()),
        ("Namespace", page.namespace().to_string()),
        ("URL", page.url(&ctx.settings.article_url)),
    ];
    if args.must_exist {
        rows.push(("Exists", "yes".to_string()));
    }
    output::fields(&rows);

    Ok(())
}
