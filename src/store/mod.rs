//! Port traits the ledger talks to, plus their backing adapters.
//!
//! The ledger never reaches into a concrete backend; it sees a keyed JSON
//! document store and a read-only person directory. Swap the MySQL adapters
//! for the in-memory ones and nothing above this module changes.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::cohort::Cohort;
use crate::model::person::PersonRef;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed to serve a load or save.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    /// A payload could not be encoded for storage.
    #[error("payload could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed JSON document store. Keys are cohort-scoped document names such as
/// `nursery_statuses` or `staff_archived_days`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self, key: &str) -> StoreResult<Option<Value>>;
    async fn save(&self, key: &str, value: Value) -> StoreResult<()>;
}

/// Read-only view of the enrolled-person roster. The ledger tolerates ids
/// this directory does not know about.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn list(&self, cohort: Cohort) -> StoreResult<Vec<PersonRef>>;
    async fn display_name(&self, person_id: &str) -> StoreResult<Option<String>>;
}
