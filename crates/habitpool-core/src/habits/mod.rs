//! Habit records and the completion event log.
//!
//! The log itself is owned by the user document; this module only defines the
//! records and a day-bucketed index the engines read from.

mod event;
mod index;

pub use event::{CompletionEvent, Habit};
pub use index::DayIndex;
