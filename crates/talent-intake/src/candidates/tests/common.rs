use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::candidates::domain::CandidateId;
use crate::candidates::repository::{CandidateRecord, CandidateRepository, RepositoryError};
use crate::candidates::{candidate_router, CandidateService, CandidateValidator};

pub(super) fn validator() -> CandidateValidator {
    CandidateValidator::default()
}

pub(super) fn education() -> Value {
    json!({
        "institution": "Universidad de Salamanca",
        "title": "Grado en Ingeniería Informática",
        "startDate": "2015-09-01",
        "endDate": "2019-06-30"
    })
}

pub(super) fn experience() -> Value {
    json!({
        "company": "Telefónica",
        "position": "Backend Developer",
        "description": "Payments platform maintenance",
        "startDate": "2019-09-01",
        "endDate": "2023-01-31"
    })
}

pub(super) fn resume() -> Value {
    json!({
        "filePath": "uploads/resumes/jose-maria-garcia.pdf",
        "fileType": "application/pdf"
    })
}

pub(super) fn candidate() -> Value {
    json!({
        "firstName": "José María",
        "lastName": "García-Pérez",
        "email": "jose.garcia@example.es",
        "phone": "666777888",
        "address": "Calle Mayor 1, Madrid",
        "education": [education()],
        "experience": [experience()],
        "resumes": [resume()]
    })
}

pub(super) fn with_field(mut payload: Value, key: &str, value: Value) -> Value {
    payload
        .as_object_mut()
        .expect("object payload")
        .insert(key.to_string(), value);
    payload
}

pub(super) fn without_field(mut payload: Value, key: &str) -> Value {
    payload
        .as_object_mut()
        .expect("object payload")
        .remove(key);
    payload
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

pub(super) struct ConflictRepository;

impl CandidateRepository for ConflictRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (CandidateService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = CandidateService::new(Arc::new(repository.clone()), validator());
    (service, repository)
}

pub(super) fn candidate_router_with_service(
    service: CandidateService<MemoryRepository>,
) -> axum::Router {
    candidate_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
