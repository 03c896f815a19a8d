use super::catalog::FundRecommendation;
use super::domain::{
    AnswerSet, DiagnosisError, DiagnosisFlow, DiagnosisState, Selection, SessionId,
};
use super::matcher::{match_quick, match_standard};

/// Permit to complete one analysis dwell.
///
/// A ticket is bound to the session's analysis epoch at the moment the dwell
/// starts. A reset bumps the epoch, so a timer still holding an old ticket
/// can only produce a no-op instead of advancing a freshly-reset session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    epoch: u64,
}

/// Result of applying an action to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session moved to the given state.
    Advanced(DiagnosisState),
    /// All answers are collected; the dwell may now be scheduled with the
    /// returned ticket.
    AnalysisStarted(AnalysisTicket),
    /// The action did not apply in the current state and changed nothing.
    Ignored,
}

/// Single-visitor questionnaire session.
///
/// The walk is strictly linear: intro, one select state per answer, the
/// analyzing dwell, then the result display. Answers are recorded exactly
/// once on the transition out of their select state; selections arriving in
/// any other state are ignored rather than rejected, since they can only be
/// produced by stale or duplicated UI events.
#[derive(Debug, Clone)]
pub struct DiagnosisSession {
    id: SessionId,
    flow: DiagnosisFlow,
    state: DiagnosisState,
    answers: AnswerSet,
    recommendation: Option<FundRecommendation>,
    analysis_epoch: u64,
}

impl DiagnosisSession {
    pub fn new(id: SessionId, flow: DiagnosisFlow) -> Self {
        Self {
            id,
            flow,
            state: DiagnosisState::Intro,
            answers: AnswerSet::default(),
            recommendation: None,
            analysis_epoch: 0,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn flow(&self) -> DiagnosisFlow {
        self.flow
    }

    pub fn state(&self) -> DiagnosisState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn recommendation(&self) -> Option<&FundRecommendation> {
        self.recommendation.as_ref()
    }

    /// Begin the questionnaire. Only meaningful from the intro screen.
    pub fn start(&mut self) -> Transition {
        if self.state != DiagnosisState::Intro {
            return Transition::Ignored;
        }
        self.state = DiagnosisState::IndustrySelect;
        Transition::Advanced(self.state)
    }

    /// Record one answer and advance.
    ///
    /// Returns `Ignored` when the selection does not belong to the current
    /// state, which covers both out-of-order input and repeated clicks after
    /// the step already advanced. The error case is unreachable through this
    /// method's own transitions and would indicate answer-set corruption.
    pub fn select(&mut self, selection: Selection) -> Result<Transition, DiagnosisError> {
        match (self.state, selection) {
            (DiagnosisState::IndustrySelect, Selection::Industry(industry)) => {
                self.answers.industry = Some(industry);
                self.state = DiagnosisState::AgeSelect;
                Ok(Transition::Advanced(self.state))
            }
            (DiagnosisState::AgeSelect, Selection::BusinessAge(age)) => {
                self.answers.business_age = Some(age);
                match self.flow {
                    DiagnosisFlow::Standard => {
                        self.state = DiagnosisState::RevenueSelect;
                        Ok(Transition::Advanced(self.state))
                    }
                    DiagnosisFlow::Quick => self.begin_analysis(),
                }
            }
            (DiagnosisState::RevenueSelect, Selection::Revenue(revenue)) => {
                self.answers.revenue = Some(revenue);
                self.begin_analysis()
            }
            _ => Ok(Transition::Ignored),
        }
    }

    /// Finish the dwell and reveal the result.
    ///
    /// A ticket from a superseded epoch, or one arriving outside the
    /// analyzing state, is stale and does nothing.
    pub fn complete_analysis(&mut self, ticket: AnalysisTicket) -> Transition {
        if self.state != DiagnosisState::Analyzing || ticket.epoch != self.analysis_epoch {
            return Transition::Ignored;
        }
        self.state = DiagnosisState::Result;
        Transition::Advanced(self.state)
    }

    /// Return to the intro screen, clearing all answers and the
    /// recommendation. Invalidates any ticket issued before the reset.
    pub fn reset(&mut self) {
        self.state = DiagnosisState::Intro;
        self.answers.clear();
        self.recommendation = None;
        self.analysis_epoch += 1;
    }

    fn begin_analysis(&mut self) -> Result<Transition, DiagnosisError> {
        let recommendation = match self.flow {
            DiagnosisFlow::Standard => match_standard(&self.answers.standard_profile()?),
            DiagnosisFlow::Quick => match_quick(&self.answers.quick_profile()?),
        };

        self.recommendation = Some(recommendation);
        self.analysis_epoch += 1;
        self.state = DiagnosisState::Analyzing;
        Ok(Transition::AnalysisStarted(AnalysisTicket {
            epoch: self.analysis_epoch,
        }))
    }
}
