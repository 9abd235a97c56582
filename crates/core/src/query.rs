//! Pure query functions over a complaint collection.
//!
//! Every function takes an explicit snapshot and returns a fresh
//! collection or scalar; inputs are never mutated. Results are derived
//! views with no identity of their own and must be recomputed after any
//! mutation rather than cached.

use std::cmp::Ordering;
use std::collections::HashMap;

use campus_store::{Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus};
use serde::{Deserialize, Serialize};

/// Sort order for complaint listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Highest priority first.
    PriorityHigh,
    /// Lowest priority first.
    PriorityLow,
}

/// Which fields a text search matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Title and description only.
    Student,
    /// Also student name, student id and department.
    Admin,
}

/// Filter set for a complaint listing.
///
/// Filters compose in a fixed order (category, status, text search, sort)
/// so results are deterministic regardless of how the caller assembled them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFilters {
    /// Keep only this category.
    #[serde(default)]
    pub category: Option<ComplaintCategory>,
    /// Keep only this status.
    #[serde(default)]
    pub status: Option<ComplaintStatus>,
    /// Case-insensitive substring search.
    #[serde(default)]
    pub search: Option<String>,
    /// Sort order for the result.
    #[serde(default)]
    pub sort: SortOrder,
}

/// Keep only complaints owned by `student_id`.
#[must_use]
pub fn filter_by_student(complaints: &[Complaint], student_id: &str) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| c.student_id == student_id)
        .cloned()
        .collect()
}

/// Keep only complaints with the given status.
#[must_use]
pub fn filter_by_status(complaints: &[Complaint], status: ComplaintStatus) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect()
}

/// Keep only complaints filed under the given category.
#[must_use]
pub fn filter_by_category(complaints: &[Complaint], category: ComplaintCategory) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| c.category == category)
        .cloned()
        .collect()
}

/// Case-insensitive substring search.
///
/// Always matches title and description; [`SearchScope::Admin`] also
/// matches the student's name, id and department.
#[must_use]
pub fn search(complaints: &[Complaint], text: &str, scope: SearchScope) -> Vec<Complaint> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return complaints.to_vec();
    }
    complaints
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
                || (scope == SearchScope::Admin
                    && (c.student_name.to_lowercase().contains(&needle)
                        || c.student_id.to_lowercase().contains(&needle)
                        || c.department.to_lowercase().contains(&needle)))
        })
        .cloned()
        .collect()
}

/// Return a sorted copy of the collection.
///
/// Priority orders break ties by `created_at` descending (newest first);
/// date ties break by `id` ascending so the order is fully deterministic.
#[must_use]
pub fn sort(complaints: &[Complaint], order: SortOrder) -> Vec<Complaint> {
    let mut sorted = complaints.to_vec();
    sorted.sort_by(|a, b| compare(a, b, order));
    sorted
}

fn compare(a: &Complaint, b: &Complaint, order: SortOrder) -> Ordering {
    let by_date_desc = |a: &Complaint, b: &Complaint| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    };
    match order {
        SortOrder::Newest => by_date_desc(a, b),
        SortOrder::Oldest => a
            .created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id)),
        SortOrder::PriorityHigh => b
            .priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| by_date_desc(a, b)),
        SortOrder::PriorityLow => a
            .priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| by_date_desc(a, b)),
    }
}

/// Count complaints per status.
///
/// The map is zero-filled over every status, so the sum of its values
/// always equals the input length.
#[must_use]
pub fn count_by_status(complaints: &[Complaint]) -> HashMap<ComplaintStatus, usize> {
    let mut counts: HashMap<_, _> = ComplaintStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for complaint in complaints {
        if let Some(n) = counts.get_mut(&complaint.status) {
            *n += 1;
        }
    }
    counts
}

/// Count complaints per category, zero-filled over every category.
#[must_use]
pub fn count_by_category(complaints: &[Complaint]) -> HashMap<ComplaintCategory, usize> {
    let mut counts: HashMap<_, _> = ComplaintCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for complaint in complaints {
        if let Some(n) = counts.get_mut(&complaint.category) {
            *n += 1;
        }
    }
    counts
}

/// Count complaints per department.
///
/// The department set is open, so only observed departments appear.
#[must_use]
pub fn count_by_department(complaints: &[Complaint]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for complaint in complaints {
        *counts.entry(complaint.department.clone()).or_insert(0) += 1;
    }
    counts
}

/// Apply a filter set in the fixed composition order:
/// category, then status, then text search, then sort.
#[must_use]
pub fn apply(complaints: &[Complaint], filters: &ComplaintFilters, scope: SearchScope) -> Vec<Complaint> {
    let mut result = complaints.to_vec();
    if let Some(category) = filters.category {
        result = filter_by_category(&result, category);
    }
    if let Some(status) = filters.status {
        result = filter_by_status(&result, status);
    }
    if let Some(text) = filters.search.as_deref() {
        result = search(&result, text, scope);
    }
    sort(&result, filters.sort)
}
