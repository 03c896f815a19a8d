use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fund_diagnosis::workflows::diagnosis::{
    diagnosis_router, match_quick, match_standard, BusinessAge, DiagnosisService, Industry,
    LeadSink, QuickProfile, RevenueBand, SessionRepository, StandardProfile,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// One-shot matching request for callers that already hold a complete
/// answer set and do not need a session (the embedded landing-page widget).
#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) industry: Industry,
    pub(crate) business_age: BusinessAge,
    /// Absent for the two-question variant; its presence selects the
    /// standard rule chain.
    #[serde(default)]
    pub(crate) revenue: Option<RevenueBand>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) name: &'static str,
    pub(crate) limit_text: &'static str,
    pub(crate) rate_text: &'static str,
    pub(crate) description: &'static str,
}

pub(crate) fn with_diagnosis_routes<S, L>(service: Arc<DiagnosisService<S, L>>) -> axum::Router
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    diagnosis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/diagnosis/match",
            axum::routing::post(match_endpoint),
        )
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

pub(crate) async fn match_endpoint(Json(payload): Json<MatchRequest>) -> Json<MatchResponse> {
    let MatchRequest {
        industry,
        business_age,
        revenue,
    } = payload;

    let record = match revenue {
        Some(revenue) => match_standard(&StandardProfile {
            industry,
            business_age,
            revenue,
        }),
        None => match_quick(&QuickProfile {
            industry,
            business_age,
        }),
    };

    Json(MatchResponse {
        name: record.name,
        limit_text: record.limit_text,
        rate_text: record.rate_text,
        description: record.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn match_endpoint_runs_the_standard_chain_when_revenue_is_present() {
        let request = MatchRequest {
            industry: Industry::ItSoftware,
            business_age: BusinessAge::UnderThreeYears,
            revenue: Some(RevenueBand::OverBillion),
        };

        let Json(body) = match_endpoint(Json(request)).await;

        assert_eq!(body.name, "혁신성장지원자금");
        assert_eq!(body.limit_text, "최대 5억원");
        assert_eq!(body.rate_text, "연 2.0% 고정");
    }

    #[tokio::test]
    async fn match_endpoint_falls_back_to_the_quick_chain_without_revenue() {
        let request = MatchRequest {
            industry: Industry::Manufacturing,
            business_age: BusinessAge::OverSevenYears,
            revenue: None,
        };

        let Json(body) = match_endpoint(Json(request)).await;

        assert_eq!(body.name, "신성장기반자금");
        assert_eq!(body.limit_text, "최대 10억원");
    }
}
