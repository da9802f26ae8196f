//! Talad Flash - flash-sale campaign draft editor
//!
//! Holds a single in-memory campaign draft, enforces per-field numeric and
//! date invariants synchronously as the operator edits, and produces the
//! multipart-ready submission payload for the campaign service.

pub mod clamp;
pub mod draft;
pub mod editor;
pub mod error;
pub mod schedule;

pub use clamp::{clamp, sanitize, ClampOutcome, FieldKind};
pub use draft::{FlashSaleDraft, FlashSaleProductRow};
pub use editor::{EditorState, FlashSaleDraftEditor, RowField};
pub use error::{DraftError, SubmitError};
pub use schedule::{ClockUnit, Direction, DurationSummary, Schedule, ScheduleError, TimeField};
