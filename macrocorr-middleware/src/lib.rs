//! macrocorr-middleware
//!
//! Connector wrappers and the builder that composes them.

mod builder;
mod cache;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector};
