use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::SessionId;
use super::session::DiagnosisSession;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: DiagnosisSession) -> Result<DiagnosisSession, RepositoryError>;
    fn update(&self, session: DiagnosisSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<DiagnosisSession>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound port for lead capture (spreadsheet script, hosted table, CRM).
///
/// Delivery failures are the sink's own concern; the diagnosis result must
/// stay displayable whether or not a lead ever reaches the back office.
pub trait LeadSink: Send + Sync {
    fn submit(&self, lead: LeadSubmission) -> Result<(), LeadError>;
}

/// Lead dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead transport unavailable: {0}")]
    Transport(String),
}

/// Payload handed to the lead sink.
///
/// Diagnosis leads carry the visitor's answers and the recommended fund name
/// alongside the contact details; direct consultation requests carry only
/// what the landing-page form collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_sales: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_fund: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Contact details collected by the result-screen form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
}

/// Contact details collected by the landing-page consultation form, with no
/// diagnosis session attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectLeadForm {
    pub company: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_sales: Option<String>,
}

/// Outcome of a lead submission as reported back to the caller.
///
/// `delivered` is advisory: a failed sink is logged and reported here, but
/// the caller's result view is unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReceipt {
    pub delivered: bool,
    pub submission: LeadSubmission,
}
