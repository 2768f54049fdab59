//! Core MediaWiki API types.

mod api_url;
mod namespace;
mod page;
mod params;
mod response;
mod token_type;

pub use api_url::ApiUrl;
pub use namespace::Namespace;
pub use page::Page;
pub use params::{ParamValue, RequestParams};
pub use response::{Payload, RawResponse, Verb};
pub use token_type::TokenType;
