use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DiagnosisFlow, Selection, SessionId};
use super::repository::{DirectLeadForm, LeadForm, LeadSink, RepositoryError, SessionRepository};
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Router builder exposing HTTP endpoints for the diagnosis funnel.
pub fn diagnosis_router<S, L>(service: Arc<DiagnosisService<S, L>>) -> Router
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    Router::new()
        .route("/api/v1/diagnosis/sessions", post(open_handler::<S, L>))
        .route(
            "/api/v1/diagnosis/sessions/:session_id",
            get(get_handler::<S, L>),
        )
        .route(
            "/api/v1/diagnosis/sessions/:session_id/start",
            post(start_handler::<S, L>),
        )
        .route(
            "/api/v1/diagnosis/sessions/:session_id/select",
            post(select_handler::<S, L>),
        )
        .route(
            "/api/v1/diagnosis/sessions/:session_id/reset",
            post(reset_handler::<S, L>),
        )
        .route(
            "/api/v1/diagnosis/sessions/:session_id/lead",
            post(lead_handler::<S, L>),
        )
        .route("/api/v1/leads", post(direct_lead_handler::<S, L>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenSessionRequest {
    #[serde(default)]
    pub(crate) flow: DiagnosisFlow,
}

pub(crate) async fn open_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    axum::Json(request): axum::Json<OpenSessionRequest>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    match service.open(request.flow) {
        Ok(snapshot) => (StatusCode::CREATED, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let id = SessionId(session_id);
    match service.get(&id) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn start_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let id = SessionId(session_id);
    match service.start(&id) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn select_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    Path(session_id): Path<String>,
    axum::Json(selection): axum::Json<Selection>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let id = SessionId(session_id);
    match service.select(&id, selection) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reset_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let id = SessionId(session_id);
    match service.reset(&id) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn lead_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    Path(session_id): Path<String>,
    axum::Json(form): axum::Json<LeadForm>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let id = SessionId(session_id);
    match service.submit_lead(&id, form) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn direct_lead_handler<S, L>(
    State(service): State<Arc<DiagnosisService<S, L>>>,
    axum::Json(form): axum::Json<DirectLeadForm>,
) -> Response
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    let receipt = service.submit_direct_lead(form);
    (StatusCode::ACCEPTED, axum::Json(receipt)).into_response()
}

fn error_response(err: DiagnosisServiceError) -> Response {
    match err {
        DiagnosisServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        DiagnosisServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "session already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        DiagnosisServiceError::Diagnosis(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
