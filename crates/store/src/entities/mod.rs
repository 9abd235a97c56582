//! Entity definitions for the complaint store.

pub mod comment;
pub mod complaint;

pub use comment::Comment;
pub use complaint::{Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus};
