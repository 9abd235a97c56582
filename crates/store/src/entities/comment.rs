//! Comment entity.

use campus_common::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in a complaint's comment thread.
///
/// Comments are owned exclusively by their parent complaint; the
/// `complaint_id` field is a lookup-only back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique id.
    pub id: String,
    /// Parent complaint id.
    pub complaint_id: String,
    /// Author's user id.
    pub user_id: String,
    /// Author's display name.
    pub user_name: String,
    /// Author's role at the time of writing.
    pub user_role: UserRole,
    /// Comment body; never empty.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}
