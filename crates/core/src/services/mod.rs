//! Business logic services.

pub mod comment;
pub mod complaint;
pub mod lifecycle;

pub use comment::CommentService;
pub use complaint::{ComplaintService, DashboardCounts, NewComplaintInput};
pub use lifecycle::{
    LifecycleService, TransitionPayload, transition_allowed, SYSTEM_USER_ID, SYSTEM_USER_NAME,
};
