use super::catalog::{self, FundRecommendation};
use super::domain::{BusinessAge, Industry, QuickProfile, StandardProfile};

/// Match a completed three-question profile against the standard rule chain.
///
/// First match wins; the rules are not mutually exclusive, so their order is
/// part of the contract. In particular the wholesale rule fires before the
/// age-based rules are considered for non-manufacturing businesses.
pub fn match_standard(profile: &StandardProfile) -> FundRecommendation {
    let StandardProfile {
        industry,
        business_age,
        ..
    } = *profile;

    if business_age == BusinessAge::UnderThreeYears
        && matches!(industry, Industry::Manufacturing | Industry::ItSoftware)
    {
        if industry == Industry::ItSoftware {
            // Name and limit override only; rate and description stay on the
            // youth base terms.
            return catalog::INNOVATION_GROWTH;
        }
        return catalog::YOUTH_STARTUP;
    }

    if business_age == BusinessAge::OverSevenYears && industry == Industry::Manufacturing {
        return catalog::SMART_FACTORY;
    }

    if industry == Industry::WholesaleRetail {
        return catalog::WHOLESALE_STABILITY;
    }

    if business_age == BusinessAge::PreLaunch {
        return catalog::PRE_STARTUP_PACKAGE;
    }

    catalog::GENERAL_STABILITY
}

/// Match a two-question profile against the quick-flow rule set.
pub fn match_quick(profile: &QuickProfile) -> FundRecommendation {
    if matches!(
        profile.business_age,
        BusinessAge::PreLaunch | BusinessAge::UnderThreeYears
    ) {
        return catalog::QUICK_YOUTH_STARTUP;
    }

    if profile.industry == Industry::Manufacturing {
        return catalog::NEW_GROWTH_BASE;
    }

    catalog::QUICK_GENERAL_STABILITY
}
