//! API client module
//!
//! HTTP client for the HeliOps backend REST API.

pub mod client;
pub mod endpoints;
pub mod resource;
pub mod types;

pub use client::ApiClient;
pub use endpoints::ListQuery;
pub use resource::Resource;
pub use types::*;
