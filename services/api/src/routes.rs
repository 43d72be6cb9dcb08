use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use talent_intake::candidates::{candidate_router, CandidateRepository, CandidateService};

pub(crate) fn with_candidate_routes<R>(service: Arc<CandidateService<R>>) -> axum::Router
where
    R: CandidateRepository + 'static,
{
    candidate_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryCandidateRepository;
    use axum::body::Body;
    use axum::http::Request;
    use talent_intake::candidates::CandidateValidator;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let service = CandidateService::new(
            Arc::new(InMemoryCandidateRepository::default()),
            CandidateValidator::default(),
        );
        with_candidate_routes(Arc::new(service))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn candidate_routes_are_mounted_next_to_probes() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/candidates")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"firstName":"Ana","lastName":"Ruiz","email":"ana@example.com"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
