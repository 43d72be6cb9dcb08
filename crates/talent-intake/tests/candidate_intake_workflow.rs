//! End-to-end scenarios for candidate intake through the public validator,
//! service, and router facades.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use talent_intake::candidates::{
    candidate_router, CandidateId, CandidateRecord, CandidateRepository, CandidateService,
    CandidateServiceError, CandidateValidator, IntakeLocale, IntakePolicy, RepositoryError,
    ValidationError,
};
use talent_intake::config::IntakeConfig;

#[derive(Default)]
struct InMemoryRepository {
    records: Mutex<HashMap<CandidateId, CandidateRecord>>,
}

impl CandidateRepository for InMemoryRepository {
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
        match guard.get_mut(&record.id) {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

fn payload() -> Value {
    json!({
        "firstName": "Carmen",
        "lastName": "Núñez-Ortega",
        "email": "carmen.nunez@example.es",
        "phone": "911223344",
        "education": [{
            "institution": "Universitat de València",
            "title": "Máster en Ciencia de Datos",
            "startDate": "2020-10-01"
        }],
        "experience": [{
            "company": "Mercadona",
            "position": "Analista de datos",
            "startDate": "2021-03-15",
            "endDate": "2020-01-01"
        }],
        "resumes": [
            { "filePath": "cv/carmen.pdf", "fileType": "application/pdf" },
            {
                "filePath": "cv/carmen.docx",
                "fileType": "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        ]
    })
}

#[test]
fn validator_accepts_open_ended_education_and_unordered_experience() {
    let validator = CandidateValidator::default();
    assert_eq!(validator.validate_candidate(&payload()), Ok(()));
}

#[test]
fn validator_is_shareable_across_threads() {
    let validator = Arc::new(CandidateValidator::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || validator.validate_candidate(&payload()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), Ok(()));
    }
}

#[test]
fn policy_built_from_config_applies_locale() {
    let config = IntakeConfig {
        phone_prefixes: "3".to_string(),
        phone_digits: 10,
        name_extra_letters: "àèìòù".to_string(),
        max_attachments: 1,
    };
    let policy = IntakePolicy::from_config(&config).expect("config compiles");
    assert_eq!(
        policy.locale(),
        &IntakeLocale {
            name_extra_letters: "àèìòù".to_string(),
            phone_prefixes: vec!['3'],
            phone_digits: 10,
        }
    );
    let validator = CandidateValidator::new(policy);

    assert_eq!(
        validator.validate_candidate(&payload()),
        Err(ValidationError::InvalidName)
    );

    let italian = json!({
        "firstName": "Niccolò",
        "lastName": "Rossi",
        "email": "niccolo@example.it",
        "phone": "3471234567",
        "resumes": [
            { "filePath": "cv.pdf", "fileType": "application/pdf" },
            { "filePath": "cv.doc", "fileType": "application/msword" }
        ]
    });
    assert_eq!(
        validator.validate_candidate(&italian),
        Err(ValidationError::TooManyAttachments { max: 1, found: 2 })
    );
}

#[test]
fn service_create_then_edit_round_trip() {
    let repository = Arc::new(InMemoryRepository::default());
    let service = CandidateService::new(repository.clone(), CandidateValidator::default());

    let created = service.save(payload()).expect("candidate created");
    let edited = service
        .save(json!({ "id": created.id.0.clone(), "email": "carmen@example.org" }))
        .expect("candidate edited");

    assert_eq!(edited.fields["email"], "carmen@example.org");
    assert_eq!(edited.fields["lastName"], "Núñez-Ortega");
    assert_eq!(service.get(&created.id).expect("stored"), edited);

    let err = service
        .save(json!({ "id": created.id.0.clone(), "email": "carmen" }))
        .expect_err("invalid edit");
    assert!(matches!(
        err,
        CandidateServiceError::Validation(ValidationError::InvalidEmail)
    ));
    assert_eq!(
        service.get(&created.id).expect("stored").fields["email"],
        "carmen@example.org"
    );
}

#[tokio::test]
async fn router_rejects_too_many_attachments() {
    let service = CandidateService::new(
        Arc::new(InMemoryRepository::default()),
        CandidateValidator::default(),
    );
    let router = candidate_router(Arc::new(service));

    let mut body = payload();
    body["resumes"] = json!([
        { "filePath": "a.pdf", "fileType": "application/pdf" },
        { "filePath": "b.pdf", "fileType": "application/pdf" },
        { "filePath": "c.pdf", "fileType": "application/pdf" },
        { "filePath": "d.pdf", "fileType": "application/pdf" },
        { "filePath": "e.pdf", "fileType": "application/pdf" },
        { "filePath": "f.exe", "fileType": "application/x-msdownload" }
    ]);

    let response = router
        .oneshot(
            Request::post("/api/v1/candidates")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json payload");
    assert_eq!(payload["code"], "too_many_attachments");
}
