use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateRepository};
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_intake::candidates::{CandidateService, CandidateValidator, IntakePolicy};
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;
use talent_intake::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = IntakePolicy::from_config(&config.intake)?;
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let candidate_service = Arc::new(CandidateService::new(
        repository,
        CandidateValidator::new(policy),
    ));

    let policy = candidate_service.validator().policy();
    info!(
        max_attachments = policy.max_attachments(),
        phone_digits = policy.locale().phone_digits,
        attachment_types = ?policy.allowed_attachment_types(),
        "candidate intake policy loaded"
    );

    let app = with_candidate_routes(candidate_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
