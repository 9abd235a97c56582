//! Authenticated identity claims.
//!
//! A [`Session`] is produced by the trusted authentication boundary outside
//! this workspace and consumed read-only by the core. The core performs no
//! credential validation; it only enforces role and ownership rules against
//! the claims it is handed. A session must never be reconstructed from
//! values the core itself persists or accepts as free-form input.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A student; may only see and comment on their own complaints.
    Student,
    /// An administrator; may see and mutate any complaint.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Authenticated identity under which an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique user id.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Role of the caller.
    pub role: UserRole,
    /// Student registration number; present for student sessions.
    pub student_id: Option<String>,
    /// Department; present for student sessions.
    pub department: Option<String>,
}

impl Session {
    /// Whether this session carries admin privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Build a student session.
    #[must_use]
    pub fn student(
        user_id: impl Into<String>,
        name: impl Into<String>,
        student_id: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            role: UserRole::Student,
            student_id: Some(student_id.into()),
            department: Some(department.into()),
        }
    }

    /// Build an admin session.
    #[must_use]
    pub fn admin(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            role: UserRole::Admin,
            student_id: None,
            department: None,
        }
    }
}
