//! Talad Client - HTTP client for the storefront backend
//!
//! Network implementations of the collaborator contracts in
//! `shared::collab`: catalog/tag lookup and campaign submission, carried
//! over a bearer-token-authenticated reqwest client.

pub mod campaign;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use types::ApiResponse;
