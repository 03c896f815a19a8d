use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository, RecordingLeadSink};
use crate::routes::with_diagnosis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fund_diagnosis::config::AppConfig;
use fund_diagnosis::error::AppError;
use fund_diagnosis::telemetry;
use fund_diagnosis::workflows::diagnosis::DiagnosisService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dwell_ms) = args.dwell_ms.take() {
        config.diagnosis.analysis_dwell_ms = dwell_ms;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sessions = Arc::new(InMemorySessionRepository::default());
    let leads = Arc::new(RecordingLeadSink::default());
    let diagnosis_service = Arc::new(DiagnosisService::new(
        sessions,
        leads,
        config.diagnosis.dwell(),
    ));

    let app = with_diagnosis_routes(diagnosis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "policy fund diagnosis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
