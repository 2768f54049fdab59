//! Parameter builders for the API modules the client drives itself.

use mwapi_core::{Page, RequestParams, TokenType};

/// Parameters added to every request; caller values override them.
pub fn default_params() -> RequestParams {
    RequestParams::new().with("format", "json")
}

/// `action=query&meta=tokens&type=<type>`
pub fn token_query(token_type: TokenType) -> RequestParams {
    RequestParams::new()
        .with("action", "query")
        .with("meta", "tokens")
        .with("type", token_type.as_str())
}

/// Page info query; `formatversion=2` makes `pages` a list.
pub fn page_info_query(page: &Page) -> RequestParams {
    RequestParams::new()
        .with("action", "query")
        .with("prop", "info")
        .with("titles", page.full_title())
        .with("formatversion", 2)
}

/// General site information, which carries the server time.
pub fn site_info_query() -> RequestParams {
    RequestParams::new()
        .with("action", "query")
        .with("meta", "siteinfo")
        .with("siprop", "general")
}

/// Append text to a page.
pub fn append_edit(title: &str, text: &str, summary: &str) -> RequestParams {
    RequestParams::new()
        .with("action", "edit")
        .with("title", title)
        .with("appendtext", text)
        .with("summary", summary)
}
