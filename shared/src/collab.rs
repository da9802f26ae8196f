//! Collaborator contracts
//!
//! External services the state containers depend on but do not implement:
//! the auth session, the catalog/tag lookup, and the campaign service.
//! `talad-client` provides the HTTP implementations; tests use in-memory
//! mocks.

use async_trait::async_trait;
use thiserror::Error;

use crate::identity::Identity;
use crate::models::{CampaignPayload, CampaignRecord, ProductSnapshot};

/// Collaborator call failure.
///
/// `AuthRequired` is distinct so callers can redirect to re-authentication
/// instead of showing a generic error; `Server` carries the verbatim
/// server-provided message for display to the operator.
#[derive(Debug, Clone, Error)]
pub enum CollabError {
    /// Credential missing or expired (HTTP 401).
    #[error("Authentication required")]
    AuthRequired,

    /// Server rejected the request; message is surfaced verbatim.
    #[error("{0}")]
    Server(String),

    /// Transport-level failure (connect, timeout, malformed body).
    #[error("Network error: {0}")]
    Network(String),
}

/// Result type for collaborator calls.
pub type CollabResult<T> = Result<T, CollabError>;

/// Source of the current session identity and credential.
pub trait AuthSource: Send + Sync {
    /// The active identity; `Identity::Guest` when nobody is logged in.
    fn identity(&self) -> Identity;

    /// Bearer credential for the active identity, if authenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// Catalog lookup used by tag-based bulk add.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve all products carrying any of the given tag ids.
    async fn products_by_tags(&self, tag_ids: &[String]) -> CollabResult<Vec<ProductSnapshot>>;
}

/// Campaign service accepting flash-sale submissions.
#[async_trait]
pub trait CampaignService: Send + Sync {
    /// Create a new campaign from the payload.
    async fn create(&self, payload: CampaignPayload) -> CollabResult<CampaignRecord>;

    /// Update an existing campaign by id.
    async fn update(&self, id: &str, payload: CampaignPayload) -> CollabResult<CampaignRecord>;
}
