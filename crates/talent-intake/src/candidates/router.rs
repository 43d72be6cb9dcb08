use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::domain::{CandidateId, FIELD_ID};
use super::repository::CandidateRepository;
use super::service::{CandidateService, CandidateServiceError};

/// Router builder exposing candidate create, edit, and lookup endpoints.
pub fn candidate_router<R>(service: Arc<CandidateService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(create_handler::<R>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(fetch_handler::<R>).put(edit_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    axum::Json(mut payload): axum::Json<Value>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    // A create request never targets an existing record.
    if let Some(object) = payload.as_object_mut() {
        object.remove(FIELD_ID);
    }

    match service.save(payload) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(mut payload): axum::Json<Value>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let Some(object) = payload.as_object_mut() else {
        let body = json!({ "error": "candidate payload must be a JSON object" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
    };
    object.insert(FIELD_ID.to_string(), Value::String(candidate_id));

    match service.save(payload) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<CandidateService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.get(&CandidateId(candidate_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CandidateServiceError) -> Response {
    let (status, payload) = match &error {
        CandidateServiceError::Validation(violation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": violation.to_string(), "code": violation.code() }),
        ),
        CandidateServiceError::NotFound => {
            (StatusCode::NOT_FOUND, json!({ "error": error.to_string() }))
        }
        CandidateServiceError::Conflict => {
            (StatusCode::CONFLICT, json!({ "error": error.to_string() }))
        }
        CandidateServiceError::StorageUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}
