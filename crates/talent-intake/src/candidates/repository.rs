use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::CandidateId;

/// Stored candidate: identifier plus the accepted payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CandidateRecord {
    /// Overlay supplied top-level fields. `null` counts as not supplied, so
    /// untouched and nulled fields keep their stored value.
    pub fn apply_changes(&mut self, changes: Map<String, Value>) {
        for (key, value) in changes {
            if key == super::domain::FIELD_ID || value.is_null() {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
