use serde::Serialize;

/// One row of the fund catalog as shown to a visitor.
///
/// Every field is display text. The limit and rate strings are rendered
/// verbatim (partially blurred upstream) and are never parsed back into
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FundRecommendation {
    pub name: &'static str,
    pub limit_text: &'static str,
    pub rate_text: &'static str,
    pub description: &'static str,
}

/// Youth startup fund: businesses under three years in manufacturing or IT.
pub const YOUTH_STARTUP: FundRecommendation = FundRecommendation {
    name: "청년전용창업자금",
    limit_text: "최대 2억원",
    rate_text: "연 2.0% 고정",
    description: "대표님 같은 청년 혁신 기업을 위한 특별 우대 자금",
};

/// IT variant of the youth startup rule. Only the name and limit differ;
/// rate and description are carried over from the youth base row, which is
/// how the upstream catalog behaves.
pub const INNOVATION_GROWTH: FundRecommendation = FundRecommendation {
    name: "혁신성장지원자금",
    limit_text: "최대 5억원",
    rate_text: YOUTH_STARTUP.rate_text,
    description: YOUTH_STARTUP.description,
};

/// Facility and operating fund for mature manufacturers.
pub const SMART_FACTORY: FundRecommendation = FundRecommendation {
    name: "제조현장 스마트화 자금",
    limit_text: "최대 10억원",
    rate_text: "연 2.8% 변동",
    description: "제조 공정 효율화를 위한 시설 및 운전 자금",
};

/// Wholesale/retail row of the general stability fund. Shares its name with
/// [`GENERAL_STABILITY`] but carries its own limit and rate text; the two
/// rows must stay distinct so wholesale visitors see the wholesale terms.
pub const WHOLESALE_STABILITY: FundRecommendation = FundRecommendation {
    name: "일반경영안정자금",
    limit_text: "최대 7천만원",
    rate_text: "연 3.2%~",
    description: "도소매업 사장님을 위한 든든한 운영 자금",
};

/// Pre-registration startup package tie-in.
pub const PRE_STARTUP_PACKAGE: FundRecommendation = FundRecommendation {
    name: "예비창업패키지 연계 자금",
    limit_text: "최대 1억원",
    rate_text: "연 2.0%~",
    description: "사업자 등록 전후로 신청 가능한 초기 자금",
};

/// Default fallback when no other standard rule applies.
pub const GENERAL_STABILITY: FundRecommendation = FundRecommendation {
    name: "일반경영안정자금",
    limit_text: "최대 1억원",
    rate_text: "연 2.5%~",
    description: "소상공인 및 중소기업을 위한 일반 운영 자금",
};

/// Quick-flow row for young or not-yet-registered founders.
pub const QUICK_YOUTH_STARTUP: FundRecommendation = FundRecommendation {
    name: "청년전용창업자금",
    limit_text: "최대 1억원",
    rate_text: "연 2.5% 내외",
    description: "우수한 기술력과 사업성을 보유한 초기 창업기업을 위한 자금",
};

/// Quick-flow row for manufacturers past the startup window.
pub const NEW_GROWTH_BASE: FundRecommendation = FundRecommendation {
    name: "신성장기반자금",
    limit_text: "최대 10억원",
    rate_text: "연 3.0% 내외",
    description: "제조업 혁신 및 설비 투자를 위한 대규모 지원 자금",
};

/// Quick-flow default row.
pub const QUICK_GENERAL_STABILITY: FundRecommendation = FundRecommendation {
    name: "일반경영안정자금",
    limit_text: "최대 5억원",
    rate_text: "연 3.5% 내외",
    description: "중소기업의 원활한 경영 활동을 지원하는 운전자금",
};

/// Every row the standard matcher can emit.
pub const STANDARD_ROWS: [FundRecommendation; 6] = [
    YOUTH_STARTUP,
    INNOVATION_GROWTH,
    SMART_FACTORY,
    WHOLESALE_STABILITY,
    PRE_STARTUP_PACKAGE,
    GENERAL_STABILITY,
];

/// Every row the quick matcher can emit.
pub const QUICK_ROWS: [FundRecommendation; 3] = [
    QUICK_YOUTH_STARTUP,
    NEW_GROWTH_BASE,
    QUICK_GENERAL_STABILITY,
];
