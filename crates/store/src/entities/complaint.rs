//! Complaint entity.

use campus_common::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::Comment;

/// Complaint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    /// Newly submitted, awaiting triage.
    #[default]
    Pending,
    /// Assigned and being worked on.
    InProgress,
    /// Closed with a resolution. Terminal.
    Resolved,
    /// Closed with a stated reason. Terminal.
    Rejected,
}

impl ComplaintStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Resolved, Self::Rejected];
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Complaint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintCategory {
    Academic,
    Infrastructure,
    Administrative,
    Hostel,
    Canteen,
    Other,
}

impl ComplaintCategory {
    /// All categories.
    pub const ALL: [Self; 6] = [
        Self::Academic,
        Self::Infrastructure,
        Self::Administrative,
        Self::Hostel,
        Self::Canteen,
        Self::Other,
    ];
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Academic => write!(f, "academic"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Administrative => write!(f, "administrative"),
            Self::Hostel => write!(f, "hostel"),
            Self::Canteen => write!(f, "canteen"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Complaint priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
}

impl ComplaintPriority {
    /// Numeric rank for ordering; higher means more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl std::fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A student-submitted complaint tracked through a fixed status lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Unique id, immutable after creation.
    pub id: String,
    /// Short summary of the grievance.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Category the complaint was filed under.
    pub category: ComplaintCategory,
    /// Submitted priority.
    pub priority: ComplaintPriority,
    /// Owning student's registration number. Immutable.
    pub student_id: String,
    /// Owning student's display name. Immutable.
    pub student_name: String,
    /// Owning student's department. Immutable.
    pub department: String,
    /// Current lifecycle status.
    pub status: ComplaintStatus,
    /// Who the complaint is assigned to; set when moving to in-progress.
    pub assigned_to: Option<String>,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// When the complaint was submitted.
    pub created_at: DateTime<Utc>,
    /// Last mutation time; never moves backwards.
    pub updated_at: DateTime<Utc>,
    /// When the complaint was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Comment thread, in append (chronological) order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Complaint {
    /// Advance `updated_at` to now.
    ///
    /// Clamped so `updated_at` never decreases even if the wall clock
    /// steps backwards between mutations.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Append a comment to the thread and advance `updated_at`.
    pub fn append_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.touch();
    }

    /// Check the record-level invariants that must hold after any mutation.
    ///
    /// Mutating call sites run this before persisting; a failure means the
    /// mutation is dropped rather than stored.
    pub fn check_invariants(&self) -> AppResult<()> {
        use campus_common::AppError;

        if self.created_at > self.updated_at {
            return Err(AppError::Internal(format!(
                "complaint {}: createdAt is after updatedAt",
                self.id
            )));
        }
        match self.status {
            ComplaintStatus::Rejected
                if self.rejection_reason.as_deref().is_none_or(str::is_empty) =>
            {
                Err(AppError::Internal(format!(
                    "complaint {}: rejected without a rejection reason",
                    self.id
                )))
            }
            ComplaintStatus::InProgress
                if self.assigned_to.as_deref().is_none_or(str::is_empty) =>
            {
                Err(AppError::Internal(format!(
                    "complaint {}: in-progress without an assignee",
                    self.id
                )))
            }
            ComplaintStatus::Resolved
                if self.resolved_at.is_none_or(|t| t < self.created_at) =>
            {
                Err(AppError::Internal(format!(
                    "complaint {}: resolved without a valid resolution time",
                    self.id
                )))
            }
            _ => Ok(()),
        }
    }
}
