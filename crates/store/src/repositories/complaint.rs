//! Complaint repository over in-memory state.

use std::collections::HashMap;
use std::sync::Arc;

use campus_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::Complaint;

/// Canonical collection of complaints, keyed by id.
///
/// The handle is cheap to clone; all clones share the same underlying map.
/// A single store-wide lock serializes writes, so a read-modify-write on a
/// given id never interleaves with another write to the same id. Contents
/// do not survive the process; durable persistence is an external
/// collaborator behind this same interface.
#[derive(Debug, Clone, Default)]
pub struct ComplaintRepository {
    complaints: Arc<RwLock<HashMap<String, Complaint>>>,
}

impl ComplaintRepository {
    /// Create a new, empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new complaint.
    ///
    /// Fails with `Conflict` if the id is already taken; ids are assigned
    /// once at creation and never reused.
    pub async fn create(&self, complaint: Complaint) -> AppResult<Complaint> {
        let mut complaints = self.complaints.write().await;
        if complaints.contains_key(&complaint.id) {
            return Err(AppError::Conflict(format!(
                "Complaint {} already exists",
                complaint.id
            )));
        }
        complaints.insert(complaint.id.clone(), complaint.clone());
        Ok(complaint)
    }

    /// Get a complaint by id.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Complaint> {
        self.complaints
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Complaint {id} not found")))
    }

    /// Replace a complaint wholesale.
    ///
    /// The caller is responsible for invariant maintenance before calling.
    pub async fn replace(&self, id: &str, complaint: Complaint) -> AppResult<Complaint> {
        let mut complaints = self.complaints.write().await;
        if !complaints.contains_key(id) {
            return Err(AppError::NotFound(format!("Complaint {id} not found")));
        }
        complaints.insert(id.to_string(), complaint.clone());
        Ok(complaint)
    }

    /// Read-modify-write a complaint under a single write-lock acquisition.
    ///
    /// The closure runs against a working copy; if it returns an error the
    /// stored record is left untouched, so a failed precondition check can
    /// never leave a partial mutation behind.
    pub async fn update<F>(&self, id: &str, f: F) -> AppResult<Complaint>
    where
        F: FnOnce(&mut Complaint) -> AppResult<()>,
    {
        let mut complaints = self.complaints.write().await;
        let current = complaints
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Complaint {id} not found")))?;

        let mut updated = current.clone();
        f(&mut updated)?;
        updated.check_invariants()?;

        complaints.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// All complaints, in unspecified order.
    ///
    /// Consumers must sort explicitly; see the query engine.
    pub async fn list_all(&self) -> Vec<Complaint> {
        self.complaints.read().await.values().cloned().collect()
    }

    /// Number of stored complaints.
    pub async fn count(&self) -> usize {
        self.complaints.read().await.len()
    }
}
