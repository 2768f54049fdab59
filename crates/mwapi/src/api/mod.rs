//! Request dispatch and token retrieval.
//!
//! The [`Dispatcher`] turns raw transport exchanges into decoded JSON or
//! typed failures; the [`TokenProvider`] builds on it to fetch action tokens.

mod dispatch;
mod params;
mod tokens;

pub use dispatch::Dispatcher;
pub use tokens::{EMPTY_TOKEN, TokenProvider};

pub(crate) use params::*;
