use crate::infra::{InMemorySessionRepository, RecordingLeadSink};
use clap::Args;
use fund_diagnosis::error::AppError;
use fund_diagnosis::workflows::diagnosis::{
    match_quick, match_standard, AnswerSet, BusinessAge, DiagnosisFlow, DiagnosisService,
    DiagnosisServiceError, FundRecommendation, Industry, LeadForm, RevenueBand, Selection,
    SessionSnapshot,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Industry classification (manufacturing, it_software, wholesale_retail, other_service)
    #[arg(long, value_parser = crate::infra::parse_industry)]
    pub(crate) industry: Industry,
    /// Business age band (pre_launch, under_3y, under_7y, over_7y)
    #[arg(long, value_parser = crate::infra::parse_business_age)]
    pub(crate) business_age: BusinessAge,
    /// Prior-year revenue band (under_100m, 100m_to_1b, over_1b); required for the standard flow
    #[arg(long, value_parser = crate::infra::parse_revenue)]
    pub(crate) revenue: Option<RevenueBand>,
    /// Use the two-question quick flow instead of the standard rule chain
    #[arg(long)]
    pub(crate) quick: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run the two-question quick flow instead of the standard one
    #[arg(long)]
    pub(crate) quick: bool,
    /// Analyzing dwell for the demo session, in milliseconds
    #[arg(long, default_value_t = 800)]
    pub(crate) dwell_ms: u64,
    /// Skip the lead-capture portion of the demo
    #[arg(long)]
    pub(crate) skip_lead: bool,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs {
        industry,
        business_age,
        revenue,
        quick,
    } = args;

    let answers = AnswerSet {
        industry: Some(industry),
        business_age: Some(business_age),
        revenue,
    };

    let record = if quick {
        match_quick(&answers.quick_profile().map_err(DiagnosisServiceError::from)?)
    } else {
        match_standard(
            &answers
                .standard_profile()
                .map_err(DiagnosisServiceError::from)?,
        )
    };

    println!("Answer set");
    println!("- Industry: {} ({})", industry.label(), industry.code());
    println!(
        "- Business age: {} ({})",
        business_age.label(),
        business_age.code()
    );
    match revenue {
        Some(revenue) => println!("- Revenue: {} ({})", revenue.label(), revenue.code()),
        None => println!("- Revenue: not collected"),
    }

    render_recommendation(&record);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        quick,
        dwell_ms,
        skip_lead,
    } = args;

    let flow = if quick {
        DiagnosisFlow::Quick
    } else {
        DiagnosisFlow::Standard
    };
    let dwell = Duration::from_millis(dwell_ms);

    let sessions = Arc::new(InMemorySessionRepository::default());
    let leads = Arc::new(RecordingLeadSink::default());
    let service = Arc::new(DiagnosisService::new(sessions, leads.clone(), dwell));

    println!("Policy fund diagnosis demo ({} flow)", flow.label());

    let opened = service.open(flow)?;
    let id = opened.session_id.clone();
    render_step("Session opened", &opened);

    let started = service.start(&id)?;
    render_step("Questionnaire started", &started);

    let after_industry = service.select(&id, Selection::Industry(Industry::Manufacturing))?;
    render_step("Industry selected", &after_industry);

    let after_age = service.select(&id, Selection::BusinessAge(BusinessAge::OverSevenYears))?;
    render_step("Business age selected", &after_age);

    if flow == DiagnosisFlow::Standard {
        let after_revenue = service.select(&id, Selection::Revenue(RevenueBand::OverBillion))?;
        render_step("Revenue selected", &after_revenue);
    }

    println!("\nAnalyzing ({} ms dwell)...", dwell_ms);
    tokio::time::sleep(dwell + Duration::from_millis(200)).await;

    let result = service.get(&id)?;
    render_step("Dwell elapsed", &result);

    match &result.recommendation {
        Some(record) => render_recommendation(record),
        None => println!("No recommendation revealed; dwell may not have elapsed"),
    }

    if skip_lead {
        return Ok(());
    }

    println!("\nLead capture demo");
    let receipt = service.submit_lead(
        &id,
        LeadForm {
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
        },
    )?;
    println!(
        "- Submitted lead for {} -> delivered: {}",
        receipt.submission.name, receipt.delivered
    );
    match serde_json::to_string_pretty(&receipt.submission) {
        Ok(json) => println!("  Lead payload:\n{}", json),
        Err(err) => println!("  Lead payload unavailable: {}", err),
    }
    println!("- Sink now holds {} submission(s)", leads.submissions().len());

    Ok(())
}

fn render_step(label: &str, snapshot: &SessionSnapshot) {
    println!("- {} -> state {}", label, snapshot.state_label);
}

fn render_recommendation(record: &FundRecommendation) {
    println!("\nRecommended fund: {}", record.name);
    println!("  Expected limit: {}", record.limit_text);
    println!("  Expected rate:  {}", record.rate_text);
    println!("  Note: {}", record.description);
}
