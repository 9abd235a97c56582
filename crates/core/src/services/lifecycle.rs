//! Complaint status lifecycle.
//!
//! All status writes go through [`LifecycleService::transition_status`] so
//! every change runs the same validation and leaves the same audit comment;
//! no other call site may touch `status`.

use campus_common::{AppError, AppResult, IdGenerator, Session, UserRole};
use campus_store::entities::{Comment, Complaint, ComplaintStatus};
use campus_store::repositories::ComplaintRepository;
use serde::Deserialize;

use crate::access;

/// Identity recorded on system-generated audit comments.
///
/// Always the generic actor, never the acting admin; the admin is carried
/// in `assigned_to` and structured logs instead.
pub const SYSTEM_USER_ID: &str = "system";
/// Display name for the system actor.
pub const SYSTEM_USER_NAME: &str = "System";

/// Side-effect fields a transition may carry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPayload {
    /// Assignment target; required when moving to in-progress.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Reason; required when moving to rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Whether the state machine defines a transition from `from` to `to`.
///
/// `resolved` and `rejected` are terminal; reopening is not supported.
#[must_use]
pub const fn transition_allowed(from: ComplaintStatus, to: ComplaintStatus) -> bool {
    matches!(
        (from, to),
        (ComplaintStatus::Pending, ComplaintStatus::InProgress)
            | (ComplaintStatus::Pending, ComplaintStatus::Rejected)
            | (ComplaintStatus::InProgress, ComplaintStatus::Resolved)
            | (ComplaintStatus::InProgress, ComplaintStatus::Rejected)
    )
}

/// Service enforcing the complaint status state machine.
#[derive(Clone)]
pub struct LifecycleService {
    repo: ComplaintRepository,
    id_gen: IdGenerator,
}

impl LifecycleService {
    /// Create a new lifecycle service.
    #[must_use]
    pub const fn new(repo: ComplaintRepository) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Transition a complaint to `target`, admin only.
    ///
    /// Validates the transition against the table, applies its side-effect
    /// fields, advances `updated_at` and appends the system audit comment,
    /// all under a single read-modify-write. Any failed precondition leaves
    /// the complaint unchanged.
    pub async fn transition_status(
        &self,
        complaint_id: &str,
        target: ComplaintStatus,
        payload: TransitionPayload,
        session: &Session,
    ) -> AppResult<Complaint> {
        let current = self.repo.get_by_id(complaint_id).await?;

        if !access::can_mutate_status(session) {
            tracing::warn!(
                complaint_id = %complaint_id,
                user_id = %session.user_id,
                "Denied status transition"
            );
            return Err(AppError::Forbidden(
                "Only administrators can change complaint status".to_string(),
            ));
        }

        if !transition_allowed(current.status, target) {
            return Err(AppError::InvalidTransition(format!(
                "Cannot move a {} complaint to {target}",
                current.status
            )));
        }

        let comment_id = self.id_gen.generate();
        let from = current.status;
        let updated = self
            .repo
            .update(complaint_id, |complaint| {
                // Re-validated under the write lock; another writer may have
                // advanced the status since the read above.
                if !transition_allowed(complaint.status, target) {
                    return Err(AppError::InvalidTransition(format!(
                        "Cannot move a {} complaint to {target}",
                        complaint.status
                    )));
                }
                let audit = apply_transition(complaint, target, &payload)?;
                complaint.append_comment(Comment {
                    id: comment_id,
                    complaint_id: complaint.id.clone(),
                    user_id: SYSTEM_USER_ID.to_string(),
                    user_name: SYSTEM_USER_NAME.to_string(),
                    user_role: UserRole::Admin,
                    content: audit,
                    created_at: chrono::Utc::now(),
                });
                Ok(())
            })
            .await?;

        tracing::info!(
            complaint_id = %complaint_id,
            from = %from,
            to = %target,
            admin_id = %session.user_id,
            "Complaint status changed"
        );
        Ok(updated)
    }
}

/// Apply the target status and its side-effect fields, returning the audit
/// comment text.
fn apply_transition(
    complaint: &mut Complaint,
    target: ComplaintStatus,
    payload: &TransitionPayload,
) -> AppResult<String> {
    let audit = match target {
        ComplaintStatus::InProgress => {
            let assigned_to = payload
                .assigned_to
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::missing_field("assignedTo"))?;
            complaint.assigned_to = Some(assigned_to.to_string());
            format!("Status changed to in-progress. Assigned to {assigned_to}.")
        }
        ComplaintStatus::Rejected => {
            let reason = payload
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::missing_field("rejectionReason"))?;
            complaint.rejection_reason = Some(reason.to_string());
            format!("Status changed to rejected. Reason: {reason}")
        }
        ComplaintStatus::Resolved => {
            complaint.resolved_at = Some(chrono::Utc::now());
            "Status changed to resolved.".to_string()
        }
        // The transition table never admits pending as a target.
        ComplaintStatus::Pending => {
            return Err(AppError::InvalidTransition(
                "Cannot move a complaint back to pending".to_string(),
            ));
        }
    };
    complaint.status = target;
    complaint.touch();
    Ok(audit)
}
