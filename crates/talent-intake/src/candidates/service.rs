use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::domain::{CandidateId, CandidatePayload, FIELD_ID};
use super::repository::{CandidateRecord, CandidateRepository, RepositoryError};
use super::validation::{CandidateValidator, ValidationError};

/// Service running the validator ahead of every repository write.
pub struct CandidateService<R> {
    validator: Arc<CandidateValidator>,
    repository: Arc<R>,
}

static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

impl<R> CandidateService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>, validator: CandidateValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            repository,
        }
    }

    pub fn validator(&self) -> &CandidateValidator {
        &self.validator
    }

    /// Validate and persist a payload. Payloads carrying an `id` update the
    /// stored candidate with the supplied fields only.
    pub fn save(&self, payload: Value) -> Result<CandidateRecord, CandidateServiceError> {
        let view = CandidatePayload::new(&payload);
        let mode = view.mode();
        let existing_id = view.id().map(|raw| {
            CandidateId::from_value(raw).unwrap_or_else(|| CandidateId(raw.to_string()))
        });

        if let Err(violation) = self.validator.validate_candidate(&payload) {
            warn!(mode = mode.label(), code = violation.code(), "candidate payload rejected");
            return Err(violation.into());
        }

        let mut fields = match payload {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.remove(FIELD_ID);

        let result = match existing_id {
            Some(id) => self.apply_edit(id, fields),
            None => self.create(fields),
        };

        match &result {
            Ok(record) => {
                info!(mode = mode.label(), candidate_id = %record.id, "candidate saved");
            }
            Err(err) if err.is_retryable() => {
                warn!(mode = mode.label(), error = %err, "candidate storage unavailable");
            }
            Err(err) => warn!(mode = mode.label(), error = %err, "candidate save failed"),
        }

        result
    }

    /// Fetch a stored candidate.
    pub fn get(&self, id: &CandidateId) -> Result<CandidateRecord, CandidateServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(CandidateServiceError::NotFound)
    }

    fn create(
        &self,
        fields: Map<String, Value>,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let record = CandidateRecord {
            id: next_candidate_id(),
            fields,
        };
        Ok(self.repository.insert(record)?)
    }

    fn apply_edit(
        &self,
        id: CandidateId,
        changes: Map<String, Value>,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let mut record = self
            .repository
            .fetch(&id)?
            .ok_or(CandidateServiceError::NotFound)?;
        record.apply_changes(changes);

        self.repository.update(record.clone())?;
        Ok(record)
    }
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot reach candidate storage, please try again later")]
    StorageUnavailable { reason: String },
    #[error("candidate record not found")]
    NotFound,
    #[error("candidate already exists")]
    Conflict,
}

impl CandidateServiceError {
    /// Storage outages are transient; everything else rejects the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CandidateServiceError::StorageUnavailable { .. })
    }
}

impl From<RepositoryError> for CandidateServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => Self::Conflict,
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Unavailable(reason) => Self::StorageUnavailable { reason },
        }
    }
}
