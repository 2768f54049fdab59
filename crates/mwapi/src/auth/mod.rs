//! Credentials and request signing.
//!
//! An [`Authorization`] holds the four long-lived OAuth secrets and turns
//! them into a signed [`Session`], the transport every request goes through.

mod authorization;
mod oauth;
mod session;

pub use authorization::Authorization;
pub use session::{Session, SessionOptions};
