//! Shared types for the Talad storefront client
//!
//! Common types used across the client crates: data models, the session
//! identity type, and the collaborator contracts (auth, catalog lookup,
//! campaign service) implemented by `talad-client` and by test mocks.

pub mod collab;
pub mod identity;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use collab::{AuthSource, CampaignService, CatalogLookup, CollabError};
pub use identity::Identity;
