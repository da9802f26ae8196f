//! Draft editor error types

use shared::collab::CollabError;
use thiserror::Error;

use crate::editor::RowField;

/// Validation failure blocking submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// A campaign needs at least one product.
    #[error("Campaign has no products")]
    NoProducts,

    /// A row still holds an empty transient input.
    #[error("Row {index} has an empty {field:?} field")]
    PendingField { index: usize, field: RowField },

    /// `end_time` is not after `start_time`.
    #[error("End time must be after start time")]
    InvalidDateRange,

    /// The editor has no open draft.
    #[error("No draft is open")]
    NotEditing,
}

/// Submission failure: either the draft failed the final validation gate or
/// the campaign service rejected the call.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Collab(#[from] CollabError),
}
