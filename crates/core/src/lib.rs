//! Core business logic for campus-complaints.
//!
//! The library boundary consumed by the presentation layer: complaint
//! submission and listing, the status lifecycle, comment threads, the pure
//! query engine and the access-scoping rules. No wire protocol or CLI is
//! defined here.

pub mod access;
pub mod query;
pub mod services;

pub use query::{ComplaintFilters, SearchScope, SortOrder};
pub use services::*;
