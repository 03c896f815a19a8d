//! Policy-fund diagnosis questionnaire: session state machine, fund
//! matching, and lead capture ports.
//!
//! A session walks a visitor through a short classification quiz, fabricates
//! a brief "analyzing" dwell, and surfaces one recommendation from a fixed
//! fund catalog. The matching itself is a pure lookup; the dwell exists only
//! for pacing and is guarded so that a reset can never race a pending timer
//! into a stale transition.

pub mod catalog;
pub mod domain;
pub mod matcher;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::FundRecommendation;
pub use domain::{
    AnswerSet, BusinessAge, DiagnosisError, DiagnosisFlow, DiagnosisState, Industry, QuickProfile,
    RevenueBand, Selection, SessionId, StandardProfile,
};
pub use matcher::{match_quick, match_standard};
pub use repository::{
    DirectLeadForm, LeadError, LeadForm, LeadReceipt, LeadSink, LeadSubmission, RepositoryError,
    SessionRepository,
};
pub use router::diagnosis_router;
pub use service::{DiagnosisService, DiagnosisServiceError, SessionSnapshot};
pub use session::{AnalysisTicket, DiagnosisSession, Transition};
