use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::catalog::FundRecommendation;
use super::domain::{DiagnosisError, DiagnosisFlow, DiagnosisState, Selection, SessionId};
use super::repository::{
    DirectLeadForm, LeadForm, LeadReceipt, LeadSink, LeadSubmission, RepositoryError,
    SessionRepository,
};
use super::session::{AnalysisTicket, DiagnosisSession, Transition};

/// Service composing the session store, the fund matchers, and the lead
/// sink, and owning the analyzing-dwell timers.
pub struct DiagnosisService<S, L> {
    sessions: Arc<S>,
    leads: Arc<L>,
    dwell: Duration,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("diag-{id:06}"))
}

impl<S, L> DiagnosisService<S, L>
where
    S: SessionRepository + 'static,
    L: LeadSink + 'static,
{
    pub fn new(sessions: Arc<S>, leads: Arc<L>, dwell: Duration) -> Self {
        Self {
            sessions,
            leads,
            dwell,
        }
    }

    /// Create a fresh session on the intro screen.
    pub fn open(&self, flow: DiagnosisFlow) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let session = DiagnosisSession::new(next_session_id(), flow);
        let stored = self.sessions.insert(session)?;
        Ok(SessionSnapshot::of(&stored))
    }

    /// Advance a session out of the intro screen. Ignored elsewhere.
    pub fn start(&self, id: &SessionId) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let mut session = self.fetch(id)?;
        session.start();
        let snapshot = SessionSnapshot::of(&session);
        self.sessions.update(session)?;
        Ok(snapshot)
    }

    /// Record one answer. When the final answer for the session's flow
    /// lands, the recommendation is computed and the analyzing dwell is
    /// scheduled; the result becomes visible once the dwell elapses.
    pub fn select(
        &self,
        id: &SessionId,
        selection: Selection,
    ) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let mut session = self.fetch(id)?;
        let transition = session.select(selection)?;
        let snapshot = SessionSnapshot::of(&session);
        self.sessions.update(session)?;

        if let Transition::AnalysisStarted(ticket) = transition {
            self.schedule_dwell(id.clone(), ticket);
        }

        Ok(snapshot)
    }

    /// Complete a pending dwell by hand. Used by the dwell timer itself and
    /// by callers that drive sessions deterministically (CLI, tests). Stale
    /// tickets are no-ops.
    pub fn complete_analysis(
        &self,
        id: &SessionId,
        ticket: AnalysisTicket,
    ) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let mut session = self.fetch(id)?;
        session.complete_analysis(ticket);
        let snapshot = SessionSnapshot::of(&session);
        self.sessions.update(session)?;
        Ok(snapshot)
    }

    /// Return a session to the intro screen, clearing every answer and
    /// invalidating any dwell still in flight.
    pub fn reset(&self, id: &SessionId) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let mut session = self.fetch(id)?;
        session.reset();
        let snapshot = SessionSnapshot::of(&session);
        self.sessions.update(session)?;
        Ok(snapshot)
    }

    /// Current state, partial answers, and the recommendation once revealed.
    pub fn get(&self, id: &SessionId) -> Result<SessionSnapshot, DiagnosisServiceError> {
        let session = self.fetch(id)?;
        Ok(SessionSnapshot::of(&session))
    }

    /// Submit the result-screen contact form for a finished session.
    ///
    /// Requires the session to be on the result screen. Sink failures are
    /// logged and reflected in the receipt; they never invalidate the
    /// session or its recommendation.
    pub fn submit_lead(
        &self,
        id: &SessionId,
        form: LeadForm,
    ) -> Result<LeadReceipt, DiagnosisServiceError> {
        let session = self.fetch(id)?;
        if session.state() != DiagnosisState::Result {
            return Err(DiagnosisError::RecommendationNotReady.into());
        }
        let recommendation = session
            .recommendation()
            .ok_or(DiagnosisError::RecommendationNotReady)?;

        let submission = LeadSubmission {
            name: form.name,
            phone: form.phone,
            company: None,
            industry: session.answers().industry.map(|v| v.label().to_string()),
            business_age: session
                .answers()
                .business_age
                .map(|v| v.label().to_string()),
            annual_sales: session.answers().revenue.map(|v| v.label().to_string()),
            recommended_fund: Some(recommendation.name.to_string()),
            submitted_at: Utc::now(),
        };

        Ok(self.dispatch(submission))
    }

    /// Submit a landing-page consultation request with no session attached.
    pub fn submit_direct_lead(&self, form: DirectLeadForm) -> LeadReceipt {
        let submission = LeadSubmission {
            name: form.name,
            phone: form.phone,
            company: Some(form.company),
            industry: None,
            business_age: None,
            annual_sales: form.annual_sales,
            recommended_fund: None,
            submitted_at: Utc::now(),
        };

        self.dispatch(submission)
    }

    fn dispatch(&self, submission: LeadSubmission) -> LeadReceipt {
        let delivered = match self.leads.submit(submission.clone()) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, lead = %submission.name, "lead sink rejected submission");
                false
            }
        };

        LeadReceipt {
            delivered,
            submission,
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<DiagnosisSession, DiagnosisServiceError> {
        Ok(self
            .sessions
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    /// One-shot deferred completion of the analyzing dwell. The ticket keeps
    /// the timer honest: if the session was reset (or already completed)
    /// while the timer slept, the completion is a no-op.
    fn schedule_dwell(&self, id: SessionId, ticket: AnalysisTicket) {
        let sessions = Arc::clone(&self.sessions);
        let dwell = self.dwell;

        tokio::spawn(async move {
            tokio::time::sleep(dwell).await;

            let mut session = match sessions.fetch(&id) {
                Ok(Some(session)) => session,
                Ok(None) => return,
                Err(err) => {
                    warn!(error = %err, session = %id, "dwell timer could not load session");
                    return;
                }
            };

            if session.complete_analysis(ticket) == Transition::Ignored {
                return;
            }

            if let Err(err) = sessions.update(session) {
                warn!(error = %err, session = %id, "dwell timer could not store result");
            }
        });
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Serializable view of a session for progress and result display.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub flow: DiagnosisFlow,
    pub state: DiagnosisState,
    pub state_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_age: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<FundRecommendation>,
}

impl SessionSnapshot {
    fn of(session: &DiagnosisSession) -> Self {
        // The recommendation is computed when the dwell starts but stays
        // hidden until the session reaches the result screen.
        let recommendation = if session.state() == DiagnosisState::Result {
            session.recommendation().copied()
        } else {
            None
        };

        Self {
            session_id: session.id().clone(),
            flow: session.flow(),
            state: session.state(),
            state_label: session.state().label(),
            industry: session.answers().industry.map(|v| v.label()),
            business_age: session.answers().business_age.map(|v| v.label()),
            revenue: session.answers().revenue.map(|v| v.label()),
            recommendation,
        }
    }
}
