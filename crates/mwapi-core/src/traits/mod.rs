//! Core traits for transport and remote-site behavior.

mod site;
mod transport;

pub use site::SiteAccessor;
pub use transport::Transport;
