use serde::{Deserialize, Serialize};

/// Identifier wrapper for diagnosis sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Industry classification collected in the first questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Manufacturing,
    ItSoftware,
    WholesaleRetail,
    OtherService,
}

impl Industry {
    pub const ALL: [Industry; 4] = [
        Industry::Manufacturing,
        Industry::ItSoftware,
        Industry::WholesaleRetail,
        Industry::OtherService,
    ];

    /// Wire/CLI identifier, matching the serde representation.
    pub const fn code(self) -> &'static str {
        match self {
            Industry::Manufacturing => "manufacturing",
            Industry::ItSoftware => "it_software",
            Industry::WholesaleRetail => "wholesale_retail",
            Industry::OtherService => "other_service",
        }
    }

    /// Display label as rendered to visitors and carried on lead payloads.
    pub const fn label(self) -> &'static str {
        match self {
            Industry::Manufacturing => "제조업",
            Industry::ItSoftware => "IT / SW",
            Industry::WholesaleRetail => "도소매",
            Industry::OtherService => "기타 서비스",
        }
    }
}

/// Years since the business opened, per the registration certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessAge {
    PreLaunch,
    #[serde(rename = "under_3y")]
    UnderThreeYears,
    #[serde(rename = "under_7y")]
    UnderSevenYears,
    #[serde(rename = "over_7y")]
    OverSevenYears,
}

impl BusinessAge {
    pub const ALL: [BusinessAge; 4] = [
        BusinessAge::PreLaunch,
        BusinessAge::UnderThreeYears,
        BusinessAge::UnderSevenYears,
        BusinessAge::OverSevenYears,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            BusinessAge::PreLaunch => "pre_launch",
            BusinessAge::UnderThreeYears => "under_3y",
            BusinessAge::UnderSevenYears => "under_7y",
            BusinessAge::OverSevenYears => "over_7y",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BusinessAge::PreLaunch => "예비 창업자",
            BusinessAge::UnderThreeYears => "3년 미만",
            BusinessAge::UnderSevenYears => "7년 미만",
            BusinessAge::OverSevenYears => "7년 이상",
        }
    }
}

/// Prior-year revenue band collected in the third questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueBand {
    #[serde(rename = "under_100m")]
    UnderHundredMillion,
    #[serde(rename = "100m_to_1b")]
    HundredMillionToBillion,
    #[serde(rename = "over_1b")]
    OverBillion,
}

impl RevenueBand {
    pub const ALL: [RevenueBand; 3] = [
        RevenueBand::UnderHundredMillion,
        RevenueBand::HundredMillionToBillion,
        RevenueBand::OverBillion,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            RevenueBand::UnderHundredMillion => "under_100m",
            RevenueBand::HundredMillionToBillion => "100m_to_1b",
            RevenueBand::OverBillion => "over_1b",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RevenueBand::UnderHundredMillion => "1억원 미만",
            RevenueBand::HundredMillionToBillion => "1억 ~ 10억원",
            RevenueBand::OverBillion => "10억원 이상",
        }
    }
}

/// Which questionnaire product the session runs.
///
/// The standard flow asks industry, age, and revenue; the quick flow is the
/// two-question widget variant that skips revenue and uses its own, smaller
/// rule set. The two are distinct products and are matched by distinct
/// functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisFlow {
    #[default]
    Standard,
    Quick,
}

impl DiagnosisFlow {
    pub const fn label(self) -> &'static str {
        match self {
            DiagnosisFlow::Standard => "standard",
            DiagnosisFlow::Quick => "quick",
        }
    }
}

/// Questionnaire position, one step per collected answer plus the dwell and
/// result displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisState {
    Intro,
    IndustrySelect,
    AgeSelect,
    RevenueSelect,
    Analyzing,
    Result,
}

impl DiagnosisState {
    pub const fn label(self) -> &'static str {
        match self {
            DiagnosisState::Intro => "intro",
            DiagnosisState::IndustrySelect => "industry_select",
            DiagnosisState::AgeSelect => "age_select",
            DiagnosisState::RevenueSelect => "revenue_select",
            DiagnosisState::Analyzing => "analyzing",
            DiagnosisState::Result => "result",
        }
    }
}

/// One answer submitted against a specific questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "option", rename_all = "snake_case")]
pub enum Selection {
    Industry(Industry),
    BusinessAge(BusinessAge),
    Revenue(RevenueBand),
}

/// Answers accumulated over a session. Fields are written once by the state
/// machine and only cleared by a full reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    pub industry: Option<Industry>,
    pub business_age: Option<BusinessAge>,
    pub revenue: Option<RevenueBand>,
}

impl AnswerSet {
    pub fn clear(&mut self) {
        *self = AnswerSet::default();
    }

    /// Complete three-question profile, or which field is still missing.
    pub fn standard_profile(&self) -> Result<StandardProfile, DiagnosisError> {
        Ok(StandardProfile {
            industry: self.industry.ok_or(DiagnosisError::MissingAnswer {
                missing: "industry",
            })?,
            business_age: self.business_age.ok_or(DiagnosisError::MissingAnswer {
                missing: "business_age",
            })?,
            revenue: self.revenue.ok_or(DiagnosisError::MissingAnswer {
                missing: "revenue",
            })?,
        })
    }

    /// Complete two-question profile for the quick flow.
    pub fn quick_profile(&self) -> Result<QuickProfile, DiagnosisError> {
        Ok(QuickProfile {
            industry: self.industry.ok_or(DiagnosisError::MissingAnswer {
                missing: "industry",
            })?,
            business_age: self.business_age.ok_or(DiagnosisError::MissingAnswer {
                missing: "business_age",
            })?,
        })
    }
}

/// Fully-populated answer set consumed by the standard matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardProfile {
    pub industry: Industry,
    pub business_age: BusinessAge,
    /// Collected for lead qualification; the current rule set does not
    /// consult it.
    pub revenue: RevenueBand,
}

/// Two-field profile consumed by the quick matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickProfile {
    pub industry: Industry,
    pub business_age: BusinessAge,
}

/// Contract violations inside the diagnosis core. These indicate integration
/// bugs (driving the matcher without a complete answer set, or asking for a
/// lead before a result exists) and are surfaced immediately rather than
/// papered over with a default recommendation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosisError {
    #[error("answer set incomplete: {missing} not selected")]
    MissingAnswer { missing: &'static str },
    #[error("no recommendation available until the analysis completes")]
    RecommendationNotReady,
}
