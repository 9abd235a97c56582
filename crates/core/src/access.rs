//! Role- and ownership-based access rules.
//!
//! Pure predicates over a [`Session`] and a candidate [`Complaint`]. Every
//! service entry point consults these before returning or mutating data; a
//! denial surfaces as `Forbidden` with no partial mutation.

use campus_common::{Session, UserRole};
use campus_store::Complaint;

/// Whether the session may read the complaint.
///
/// Admins see everything; a student sees only their own complaints.
#[must_use]
pub fn can_view(session: &Session, complaint: &Complaint) -> bool {
    match session.role {
        UserRole::Admin => true,
        UserRole::Student => session.student_id.as_deref() == Some(complaint.student_id.as_str()),
    }
}

/// Whether the session may change complaint status. Admin only.
#[must_use]
pub const fn can_mutate_status(session: &Session) -> bool {
    session.is_admin()
}

/// Whether the session may comment on the complaint.
///
/// Same rule as [`can_view`]: both roles may comment on complaints they
/// can see.
#[must_use]
pub fn can_comment(session: &Session, complaint: &Complaint) -> bool {
    can_view(session, complaint)
}
