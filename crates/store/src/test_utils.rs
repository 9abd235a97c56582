//! Test fixtures for complaint data.
//!
//! Shared by unit tests here and the service tests in `campus-core`.

use campus_common::UserRole;
use chrono::Utc;

use crate::entities::{
    Comment, Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus,
};

/// Build a pending complaint owned by `student_id`.
#[must_use]
pub fn complaint_fixture(id: &str, student_id: &str) -> Complaint {
    let now = Utc::now();
    Complaint {
        id: id.to_string(),
        title: "Broken AC in lecture hall".to_string(),
        description: "The air conditioning in hall B-204 has been broken for a week.".to_string(),
        category: ComplaintCategory::Infrastructure,
        priority: ComplaintPriority::High,
        student_id: student_id.to_string(),
        student_name: "John Student".to_string(),
        department: "Computer Science".to_string(),
        status: ComplaintStatus::Pending,
        assigned_to: None,
        rejection_reason: None,
        created_at: now,
        updated_at: now,
        resolved_at: None,
        comments: Vec::new(),
    }
}

/// Build a comment on `complaint_id` authored by a student.
#[must_use]
pub fn comment_fixture(id: &str, complaint_id: &str, user_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        complaint_id: complaint_id.to_string(),
        user_id: user_id.to_string(),
        user_name: "John Student".to_string(),
        user_role: UserRole::Student,
        content: "Any update on this?".to_string(),
        created_at: Utc::now(),
    }
}
