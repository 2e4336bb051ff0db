//! API client module

pub mod client;
pub mod endpoints;
pub mod response;

pub use client::ApiClient;
pub use endpoints::Action;
pub use response::ApiResponse;
