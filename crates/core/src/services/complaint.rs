//! Complaint submission, lookup and listing.

use campus_common::config::PortalConfig;
use campus_common::{AppError, AppResult, IdGenerator, Session, UserRole};
use campus_store::entities::{Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus};
use campus_store::repositories::ComplaintRepository;
use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

use crate::access;
use crate::query::{self, ComplaintFilters, SearchScope};

/// Input for submitting a complaint.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaintInput {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: ComplaintCategory,
    pub priority: ComplaintPriority,
    #[validate(length(min = 1))]
    pub student_id: String,
    #[validate(length(min = 1))]
    pub student_name: String,
    #[validate(length(min = 1))]
    pub department: String,
}

/// Aggregate counts for dashboard views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCounts {
    /// Total complaints visible to the session.
    pub total: usize,
    /// Per-status counts, zero-filled over all statuses.
    pub by_status: HashMap<ComplaintStatus, usize>,
    /// Per-category counts, zero-filled over all categories.
    pub by_category: HashMap<ComplaintCategory, usize>,
    /// Per-department counts over observed departments.
    pub by_department: HashMap<String, usize>,
}

/// Service for complaint creation and read-side views.
#[derive(Clone)]
pub struct ComplaintService {
    repo: ComplaintRepository,
    portal: PortalConfig,
    id_gen: IdGenerator,
}

impl ComplaintService {
    /// Create a new complaint service with the portal's configured limits.
    #[must_use]
    pub const fn new(repo: ComplaintRepository, portal: PortalConfig) -> Self {
        Self {
            repo,
            portal,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a new complaint.
    ///
    /// Status is forced to pending and timestamps are assigned here; the
    /// ownership fields are copied verbatim and immutable afterwards. A
    /// student may only file under their own student id.
    pub async fn create_complaint(
        &self,
        input: NewComplaintInput,
        session: &Session,
    ) -> AppResult<Complaint> {
        input.validate()?;

        let title = input.title.trim();
        let description = input.description.trim();
        if title.is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if title.len() > self.portal.max_title_length {
            return Err(AppError::Validation(format!(
                "title exceeds {} characters",
                self.portal.max_title_length
            )));
        }
        if description.is_empty() {
            return Err(AppError::missing_field("description"));
        }
        if description.len() > self.portal.max_body_length {
            return Err(AppError::Validation(format!(
                "description exceeds {} characters",
                self.portal.max_body_length
            )));
        }
        if input.student_id.trim().is_empty() {
            return Err(AppError::missing_field("studentId"));
        }
        if input.student_name.trim().is_empty() {
            return Err(AppError::missing_field("studentName"));
        }
        if input.department.trim().is_empty() {
            return Err(AppError::missing_field("department"));
        }

        if session.role == UserRole::Student
            && session.student_id.as_deref() != Some(input.student_id.as_str())
        {
            tracing::warn!(
                user_id = %session.user_id,
                student_id = %input.student_id,
                "Student attempted to file a complaint for another student"
            );
            return Err(AppError::Forbidden(
                "Students may only file complaints under their own student id".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let complaint = Complaint {
            id: self.id_gen.generate(),
            title: title.to_string(),
            description: description.to_string(),
            category: input.category,
            priority: input.priority,
            student_id: input.student_id,
            student_name: input.student_name,
            department: input.department,
            status: ComplaintStatus::Pending,
            assigned_to: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            comments: Vec::new(),
        };

        let created = self.repo.create(complaint).await?;
        tracing::info!(
            complaint_id = %created.id,
            student_id = %created.student_id,
            category = %created.category,
            priority = %created.priority,
            "Complaint created"
        );
        Ok(created)
    }

    /// Get a complaint by id, access-scoped.
    pub async fn get_complaint(&self, id: &str, session: &Session) -> AppResult<Complaint> {
        let complaint = self.repo.get_by_id(id).await?;
        if !access::can_view(session, &complaint) {
            tracing::warn!(
                complaint_id = %id,
                user_id = %session.user_id,
                "Denied complaint read"
            );
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }
        Ok(complaint)
    }

    /// List complaints visible to the session, filtered and sorted.
    ///
    /// Students are implicitly scoped to their own complaints; admins see
    /// everything and search across the student identity fields too.
    pub async fn list_complaints(
        &self,
        session: &Session,
        filters: &ComplaintFilters,
    ) -> AppResult<Vec<Complaint>> {
        let visible = self.visible_to(session).await?;
        let scope = self.search_scope(session);
        Ok(query::apply(&visible, filters, scope))
    }

    /// Status/category/department counts over the session-visible set.
    pub async fn dashboard_counts(&self, session: &Session) -> AppResult<DashboardCounts> {
        let visible = self.visible_to(session).await?;
        Ok(DashboardCounts {
            total: visible.len(),
            by_status: query::count_by_status(&visible),
            by_category: query::count_by_category(&visible),
            by_department: query::count_by_department(&visible),
        })
    }

    async fn visible_to(&self, session: &Session) -> AppResult<Vec<Complaint>> {
        let all = self.repo.list_all().await;
        match session.role {
            UserRole::Admin => Ok(all),
            UserRole::Student => {
                let student_id = session.student_id.as_deref().ok_or_else(|| {
                    AppError::Forbidden("Student session is missing a student id".to_string())
                })?;
                Ok(query::filter_by_student(&all, student_id))
            }
        }
    }

    const fn search_scope(&self, session: &Session) -> SearchScope {
        match session.role {
            UserRole::Admin => SearchScope::Admin,
            UserRole::Student => SearchScope::Student,
        }
    }
}
