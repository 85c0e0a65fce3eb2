//! # API Route Modules
//!
//! - `decisions` - ping, authenticate, submit, poll, sentence.
//! - `appeals` - the one-shot probabilistic appeal.
//! - `cases` - read-only registry listing.

pub mod appeals;
pub mod cases;
pub mod decisions;
