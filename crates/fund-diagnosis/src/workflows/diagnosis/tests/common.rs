use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::diagnosis::domain::{
    BusinessAge, DiagnosisFlow, Industry, RevenueBand, Selection, SessionId,
};
use crate::workflows::diagnosis::repository::{
    LeadError, LeadSink, LeadSubmission, RepositoryError, SessionRepository,
};
use crate::workflows::diagnosis::service::{DiagnosisService, SessionSnapshot};
use crate::workflows::diagnosis::session::DiagnosisSession;
use crate::workflows::diagnosis::{diagnosis_router, DiagnosisServiceError};

/// Short dwell so timer-driven tests stay fast while remaining observable.
pub(super) const TEST_DWELL: Duration = Duration::from_millis(25);

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, DiagnosisSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: DiagnosisSession) -> Result<DiagnosisSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: DiagnosisSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(session.id()) {
            guard.insert(session.id().clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<DiagnosisSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    submissions: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl MemorySink {
    pub(super) fn submissions(&self) -> Vec<LeadSubmission> {
        self.submissions.lock().expect("sink mutex poisoned").clone()
    }
}

impl LeadSink for MemorySink {
    fn submit(&self, lead: LeadSubmission) -> Result<(), LeadError> {
        self.submissions
            .lock()
            .expect("sink mutex poisoned")
            .push(lead);
        Ok(())
    }
}

/// Sink that always fails, for exercising degraded delivery.
pub(super) struct OfflineSink;

impl LeadSink for OfflineSink {
    fn submit(&self, _lead: LeadSubmission) -> Result<(), LeadError> {
        Err(LeadError::Transport("endpoint offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    DiagnosisService<MemoryRepository, MemorySink>,
    Arc<MemoryRepository>,
    Arc<MemorySink>,
) {
    build_service_with_dwell(TEST_DWELL)
}

pub(super) fn build_service_with_dwell(
    dwell: Duration,
) -> (
    DiagnosisService<MemoryRepository, MemorySink>,
    Arc<MemoryRepository>,
    Arc<MemorySink>,
) {
    let sessions = Arc::new(MemoryRepository::default());
    let sink = Arc::new(MemorySink::default());
    let service = DiagnosisService::new(sessions.clone(), sink.clone(), dwell);
    (service, sessions, sink)
}

pub(super) fn diagnosis_router_with_service(
    service: DiagnosisService<MemoryRepository, MemorySink>,
) -> axum::Router {
    diagnosis_router(Arc::new(service))
}

/// Drive a standard session up to the analyzing dwell.
pub(super) fn answer_standard(
    service: &DiagnosisService<MemoryRepository, MemorySink>,
    id: &SessionId,
    industry: Industry,
    business_age: BusinessAge,
    revenue: RevenueBand,
) -> Result<SessionSnapshot, DiagnosisServiceError> {
    service.start(id)?;
    service.select(id, Selection::Industry(industry))?;
    service.select(id, Selection::BusinessAge(business_age))?;
    service.select(id, Selection::Revenue(revenue))
}

/// Drive a session to a revealed result by waiting out the test dwell.
pub(super) async fn finish_standard(
    service: &DiagnosisService<MemoryRepository, MemorySink>,
    industry: Industry,
    business_age: BusinessAge,
    revenue: RevenueBand,
) -> SessionId {
    let opened = service.open(DiagnosisFlow::Standard).expect("session opens");
    let id = opened.session_id.clone();
    answer_standard(service, &id, industry, business_age, revenue).expect("answers accepted");
    tokio::time::sleep(TEST_DWELL * 4).await;
    id
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
