pub mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod revisions;

pub use client::{use_api, ApiClient};
pub use endpoints::{Endpoints, Resource};
pub use error::ApiError;
