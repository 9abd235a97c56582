//! In-memory storage layer for campus-complaints.
//!
//! Owns the canonical [`entities::Complaint`] collection and its embedded
//! comment threads. State lives entirely in memory; a durable backing store
//! is a pluggable external collaborator behind the same repository surface.

pub mod entities;
pub mod repositories;
pub mod test_utils;

pub use entities::{Comment, Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus};
pub use repositories::ComplaintRepository;
