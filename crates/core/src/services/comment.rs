//! Comment threads on complaints.

use campus_common::config::PortalConfig;
use campus_common::{AppError, AppResult, IdGenerator, Session};
use campus_store::entities::Comment;
use campus_store::repositories::ComplaintRepository;

use crate::access;

/// Service for appending to and reading complaint comment threads.
#[derive(Clone)]
pub struct CommentService {
    repo: ComplaintRepository,
    portal: PortalConfig,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service with the portal's configured limits.
    #[must_use]
    pub const fn new(repo: ComplaintRepository, portal: PortalConfig) -> Self {
        Self {
            repo,
            portal,
            id_gen: IdGenerator::new(),
        }
    }

    /// Append a comment to a complaint's thread.
    ///
    /// The comment is stamped with the caller's identity and role and the
    /// complaint's `updated_at` advances. Students may only comment on
    /// their own complaints.
    pub async fn add_comment(
        &self,
        complaint_id: &str,
        content: &str,
        session: &Session,
    ) -> AppResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }
        if content.len() > self.portal.max_body_length {
            return Err(AppError::Validation(format!(
                "comment exceeds {} characters",
                self.portal.max_body_length
            )));
        }

        let complaint = self.repo.get_by_id(complaint_id).await?;
        if !access::can_comment(session, &complaint) {
            tracing::warn!(
                complaint_id = %complaint_id,
                user_id = %session.user_id,
                "Denied comment"
            );
            return Err(AppError::Forbidden(
                "You cannot comment on this complaint".to_string(),
            ));
        }

        let comment = Comment {
            id: self.id_gen.generate(),
            complaint_id: complaint_id.to_string(),
            user_id: session.user_id.clone(),
            user_name: session.name.clone(),
            user_role: session.role,
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        };

        let appended = comment.clone();
        self.repo
            .update(complaint_id, move |complaint| {
                complaint.append_comment(appended);
                Ok(())
            })
            .await?;

        tracing::info!(
            complaint_id = %complaint_id,
            comment_id = %comment.id,
            user_id = %session.user_id,
            "Comment added"
        );
        Ok(comment)
    }

    /// The complaint's comment thread in append (chronological) order.
    ///
    /// Any "most recent first" ordering is a presentation-layer sort, not
    /// a property of the store.
    pub async fn list_comments(
        &self,
        complaint_id: &str,
        session: &Session,
    ) -> AppResult<Vec<Comment>> {
        let complaint = self.repo.get_by_id(complaint_id).await?;
        if !access::can_view(session, &complaint) {
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }
        Ok(complaint.comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_common::UserRole;
    use campus_store::test_utils::complaint_fixture;

    async fn seeded_repo() -> ComplaintRepository {
        let repo = ComplaintRepository::new();
        repo.create(complaint_fixture("cmp1", "S1")).await.unwrap();
        repo
    }

    fn owner() -> Session {
        Session::student("u1", "John Student", "S1", "Computer Science")
    }

    #[tokio::test]
    async fn test_owner_comment_appends_and_touches() {
        let repo = seeded_repo().await;
        let service = CommentService::new(repo.clone(), PortalConfig::default());
        let before = repo.get_by_id("cmp1").await.unwrap();

        let comment = service
            .add_comment("cmp1", "Any update on this?", &owner())
            .await
            .unwrap();
        assert_eq!(comment.user_role, UserRole::Student);
        assert_eq!(comment.user_name, "John Student");

        let stored = repo.get_by_id("cmp1").await.unwrap();
        assert_eq!(stored.comments.len(), 1);
        assert!(stored.updated_at >= before.updated_at);
        assert!(stored.comments[0].created_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_other_student_cannot_comment() {
        let service = CommentService::new(seeded_repo().await, PortalConfig::default());
        let other = Session::student("u2", "Jane Student", "S2", "Physics");

        let err = service
            .add_comment("cmp1", "Mine too!", &other)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_admin_can_comment_on_any_complaint() {
        let service = CommentService::new(seeded_repo().await, PortalConfig::default());
        let admin = Session::admin("a1", "Admin User");

        let comment = service
            .add_comment("cmp1", "We are looking into it.", &admin)
            .await
            .unwrap();
        assert_eq!(comment.user_role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_whitespace_comment_is_rejected() {
        let service = CommentService::new(seeded_repo().await, PortalConfig::default());

        let err = service.add_comment("cmp1", "   \n", &owner()).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_configured_body_limit_is_enforced() {
        let portal = PortalConfig {
            max_body_length: 24,
            ..PortalConfig::default()
        };
        let service = CommentService::new(seeded_repo().await, portal);

        let err = service
            .add_comment("cmp1", &"x".repeat(25), &owner())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("24"));

        assert!(
            service
                .add_comment("cmp1", "Short enough.", &owner())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_missing_complaint_is_not_found() {
        let service = CommentService::new(ComplaintRepository::new(), PortalConfig::default());

        let err = service
            .add_comment("nope", "Hello", &owner())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_thread_keeps_append_order() {
        let repo = seeded_repo().await;
        let service = CommentService::new(repo, PortalConfig::default());

        for text in ["first", "second", "third"] {
            service.add_comment("cmp1", text, &owner()).await.unwrap();
        }

        let thread = service.list_comments("cmp1", &owner()).await.unwrap();
        let contents: Vec<_> = thread.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_comments_is_access_scoped() {
        let service = CommentService::new(seeded_repo().await, PortalConfig::default());
        let other = Session::student("u2", "Jane Student", "S2", "Physics");

        let err = service.list_comments("cmp1", &other).await.unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }
}
