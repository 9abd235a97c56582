//! End-to-end complaint lifecycle tests.
//!
//! Exercises create, transition, comment and listing together over a
//! single shared repository, the way the presentation layer uses them.

#![allow(clippy::unwrap_used)]

use campus_common::config::PortalConfig;
use campus_common::Session;
use campus_core::{
    CommentService, ComplaintFilters, ComplaintService, LifecycleService, NewComplaintInput,
    TransitionPayload,
};
use campus_store::{ComplaintRepository, ComplaintCategory, ComplaintPriority, ComplaintStatus};

struct Portal {
    complaints: ComplaintService,
    lifecycle: LifecycleService,
    comments: CommentService,
}

impl Portal {
    fn new() -> Self {
        let repo = ComplaintRepository::new();
        Self {
            complaints: ComplaintService::new(repo.clone(), PortalConfig::default()),
            lifecycle: LifecycleService::new(repo.clone()),
            comments: CommentService::new(repo, PortalConfig::default()),
        }
    }
}

fn student() -> Session {
    Session::student("u1", "John Student", "S1", "Computer Science")
}

fn admin() -> Session {
    Session::admin("a1", "Admin User")
}

fn broken_ac() -> NewComplaintInput {
    NewComplaintInput {
        title: "Broken AC".to_string(),
        description: "The AC in hall B-204 has not worked for a week.".to_string(),
        category: ComplaintCategory::Infrastructure,
        priority: ComplaintPriority::High,
        student_id: "S1".to_string(),
        student_name: "John Student".to_string(),
        department: "Computer Science".to_string(),
    }
}

#[tokio::test]
async fn test_full_lifecycle_with_audit_trail() {
    let portal = Portal::new();

    let complaint = portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();
    assert_eq!(complaint.status, ComplaintStatus::Pending);
    assert_eq!(complaint.created_at, complaint.updated_at);

    // Admin assigns it
    let payload = TransitionPayload {
        assigned_to: Some("IT Department".to_string()),
        rejection_reason: None,
    };
    let in_progress = portal
        .lifecycle
        .transition_status(&complaint.id, ComplaintStatus::InProgress, payload, &admin())
        .await
        .unwrap();
    assert_eq!(in_progress.assigned_to.as_deref(), Some("IT Department"));
    assert_eq!(in_progress.comments.len(), 1);
    assert!(in_progress.comments[0].content.contains("IT Department"));

    // Student follows up, admin replies
    portal
        .comments
        .add_comment(&complaint.id, "Thanks, when can we expect a fix?", &student())
        .await
        .unwrap();
    portal
        .comments
        .add_comment(&complaint.id, "A technician visits tomorrow.", &admin())
        .await
        .unwrap();

    let resolved = portal
        .lifecycle
        .transition_status(
            &complaint.id,
            ComplaintStatus::Resolved,
            TransitionPayload::default(),
            &admin(),
        )
        .await
        .unwrap();
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert!(resolved.resolved_at.unwrap() >= resolved.created_at);
    assert!(resolved.updated_at >= resolved.created_at);

    // Audit trail reconstructable from the thread alone: two system
    // comments bracket the two user comments, in append order.
    let thread = portal
        .comments
        .list_comments(&complaint.id, &student())
        .await
        .unwrap();
    assert_eq!(thread.len(), 4);
    assert!(thread[0].content.contains("in-progress"));
    assert_eq!(thread[1].user_name, "John Student");
    assert_eq!(thread[2].user_name, "Admin User");
    assert!(thread[3].content.contains("resolved"));
}

#[tokio::test]
async fn test_failed_transition_leaves_everything_unchanged() {
    let portal = Portal::new();
    let complaint = portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();

    // Rejection without a reason
    let err = portal
        .lifecycle
        .transition_status(
            &complaint.id,
            ComplaintStatus::Rejected,
            TransitionPayload::default(),
            &admin(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    // Skipping in-progress entirely
    let err = portal
        .lifecycle
        .transition_status(
            &complaint.id,
            ComplaintStatus::Resolved,
            TransitionPayload::default(),
            &admin(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TRANSITION");

    let stored = portal
        .complaints
        .get_complaint(&complaint.id, &admin())
        .await
        .unwrap();
    assert_eq!(stored.status, ComplaintStatus::Pending);
    assert!(stored.comments.is_empty());
    assert!(stored.rejection_reason.is_none());
    assert!(stored.resolved_at.is_none());
}

#[tokio::test]
async fn test_student_isolation_across_services() {
    let portal = Portal::new();
    let mine = portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();

    let jane = Session::student("u2", "Jane Student", "S2", "Physics");
    let theirs = NewComplaintInput {
        title: "Library closes too early".to_string(),
        student_id: "S2".to_string(),
        student_name: "Jane Student".to_string(),
        department: "Physics".to_string(),
        ..broken_ac()
    };
    portal
        .complaints
        .create_complaint(theirs, &jane)
        .await
        .unwrap();

    // Jane cannot read, comment on, or transition John's complaint
    assert_eq!(
        portal
            .complaints
            .get_complaint(&mine.id, &jane)
            .await
            .unwrap_err()
            .error_code(),
        "FORBIDDEN"
    );
    assert_eq!(
        portal
            .comments
            .add_comment(&mine.id, "Same in our hall.", &jane)
            .await
            .unwrap_err()
            .error_code(),
        "FORBIDDEN"
    );
    assert_eq!(
        portal
            .lifecycle
            .transition_status(
                &mine.id,
                ComplaintStatus::InProgress,
                TransitionPayload {
                    assigned_to: Some("Facilities".to_string()),
                    rejection_reason: None,
                },
                &jane,
            )
            .await
            .unwrap_err()
            .error_code(),
        "FORBIDDEN"
    );

    // Each student lists only their own; the admin sees both
    let filters = ComplaintFilters::default();
    let janes = portal.complaints.list_complaints(&jane, &filters).await.unwrap();
    assert_eq!(janes.len(), 1);
    assert_eq!(janes[0].student_id, "S2");

    let all = portal
        .complaints
        .list_complaints(&admin(), &filters)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_admin_search_reaches_identity_fields() {
    let portal = Portal::new();
    portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();

    let filters = ComplaintFilters {
        search: Some("john".to_string()),
        ..ComplaintFilters::default()
    };
    // Matches studentName for the admin
    let found = portal
        .complaints
        .list_complaints(&admin(), &filters)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    // The student's own search only covers title and description
    let found = portal
        .complaints
        .list_complaints(&student(), &filters)
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_updated_at_is_monotonic_across_operations() {
    let portal = Portal::new();
    let complaint = portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();

    let mut last = complaint.updated_at;
    assert!(complaint.created_at <= last);

    let after_assign = portal
        .lifecycle
        .transition_status(
            &complaint.id,
            ComplaintStatus::InProgress,
            TransitionPayload {
                assigned_to: Some("IT Department".to_string()),
                rejection_reason: None,
            },
            &admin(),
        )
        .await
        .unwrap();
    assert!(after_assign.updated_at >= last);
    last = after_assign.updated_at;

    portal
        .comments
        .add_comment(&complaint.id, "Following up.", &student())
        .await
        .unwrap();
    let latest = portal
        .complaints
        .get_complaint(&complaint.id, &student())
        .await
        .unwrap();
    assert!(latest.updated_at >= last);
    assert!(latest.created_at <= latest.updated_at);
}

#[tokio::test]
async fn test_dashboard_counts_track_lifecycle() {
    let portal = Portal::new();
    for _ in 0..3 {
        portal
            .complaints
            .create_complaint(broken_ac(), &student())
            .await
            .unwrap();
    }
    let target = portal
        .complaints
        .create_complaint(broken_ac(), &student())
        .await
        .unwrap();
    portal
        .lifecycle
        .transition_status(
            &target.id,
            ComplaintStatus::Rejected,
            TransitionPayload {
                rejection_reason: Some("Duplicate report".to_string()),
                assigned_to: None,
            },
            &admin(),
        )
        .await
        .unwrap();

    let counts = portal.complaints.dashboard_counts(&admin()).await.unwrap();
    assert_eq!(counts.total, 4);
    assert_eq!(counts.by_status[&ComplaintStatus::Pending], 3);
    assert_eq!(counts.by_status[&ComplaintStatus::Rejected], 1);
    assert_eq!(counts.by_status.values().sum::<usize>(), counts.total);
    assert_eq!(counts.by_category[&ComplaintCategory::Infrastructure], 4);
}
