//! HTTP adapters for remote collaborators.

mod identity;

pub use identity::HttpIdentityValidator;
