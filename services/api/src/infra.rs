use fund_diagnosis::workflows::diagnosis::{
    BusinessAge, DiagnosisSession, Industry, LeadError, LeadSink, LeadSubmission, RepositoryError,
    RevenueBand, SessionId, SessionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, DiagnosisSession>>>,
}

impl SessionRepository for InMemorySessionRepository {
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

/// Lead sink that records submissions in memory. The production transports
/// (spreadsheet script, hosted table) hang off this port; the service keeps
/// working, minus delivery, when they are absent.
#[derive(Default, Clone)]
pub(crate) struct RecordingLeadSink {
    submissions: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl RecordingLeadSink {
    pub(crate) fn submissions(&self) -> Vec<LeadSubmission> {
        self.submissions
            .lock()
            .expect("lead mutex poisoned")
            .clone()
    }
}

impl LeadSink for RecordingLeadSink {
    fn submit(&self, lead: LeadSubmission) -> Result<(), LeadError> {
        self.submissions
            .lock()
            .expect("lead mutex poisoned")
            .push(lead);
        Ok(())
    }
}

pub(crate) fn parse_industry(raw: &str) -> Result<Industry, String> {
    Industry::ALL
        .into_iter()
        .find(|industry| industry.code() == raw.trim())
        .ok_or_else(|| {
            format!(
                "unknown industry '{raw}' (expected one of: {})",
                codes(Industry::ALL.iter().map(|v| v.code()))
            )
        })
}

pub(crate) fn parse_business_age(raw: &str) -> Result<BusinessAge, String> {
    BusinessAge::ALL
        .into_iter()
        .find(|age| age.code() == raw.trim())
        .ok_or_else(|| {
            format!(
                "unknown business age '{raw}' (expected one of: {})",
                codes(BusinessAge::ALL.iter().map(|v| v.code()))
            )
        })
}

pub(crate) fn parse_revenue(raw: &str) -> Result<RevenueBand, String> {
    RevenueBand::ALL
        .into_iter()
        .find(|band| band.code() == raw.trim())
        .ok_or_else(|| {
            format!(
                "unknown revenue band '{raw}' (expected one of: {})",
                codes(RevenueBand::ALL.iter().map(|v| v.code()))
            )
        })
}

fn codes<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_published_code() {
        for industry in Industry::ALL {
            assert_eq!(parse_industry(industry.code()), Ok(industry));
        }
        for age in BusinessAge::ALL {
            assert_eq!(parse_business_age(age.code()), Ok(age));
        }
        for band in RevenueBand::ALL {
            assert_eq!(parse_revenue(band.code()), Ok(band));
        }
    }

    #[test]
    fn rejects_unknown_codes_with_the_accepted_list() {
        let err = parse_industry("agriculture").expect_err("unknown code");
        assert!(err.contains("manufacturing"));
        assert!(err.contains("other_service"));
    }
}
