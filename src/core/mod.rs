//! Pure, synchronous club logic. Every function here operates on a snapshot
//! of the collections passed in by the caller; none touch the database, the
//! clock, or any ambient actor state.

pub mod assignee;
pub mod calendar;
pub mod extractor;
pub mod lifecycle;
pub mod progress;
pub mod template;
