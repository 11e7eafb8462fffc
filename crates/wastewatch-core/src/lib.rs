pub mod attachment;
pub mod classifier;
pub mod dashboard;
pub mod error;
pub mod factory;
pub mod model;
pub mod policy;
pub mod route;
pub mod store;
pub mod validate;

use error::ReportError;
use factory::ReportDraft;
use model::Report;
use policy::schema::Policy;
use store::ReportStore;
use tracing::info;

/// Result of running a draft through the intake pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub report: Report,
    /// False when the report was judged vague and left unrouted.
    pub routed: bool,
}

/// Main API entry point: build, validate and (if valid) route a report.
///
/// Invalid reports keep `Status::New` and no priority; they are still
/// returned so they can be stored for later review.
pub fn submit(draft: ReportDraft, policy: &Policy) -> Result<Submission, ReportError> {
    let mut report = factory::build_report_now(draft)?;

    let validation = validate::apply_validation(&mut report, &policy.validation);
    let routed = validation.is_valid && route::apply_routing(&mut report, &policy.routing);

    info!(
        id = %report.id,
        valid = validation.is_valid,
        area = %validation.predicted_area,
        status = %report.status_label(),
        "processed submission"
    );

    Ok(Submission { report, routed })
}

/// Run the intake pipeline and append the result to the store.
pub fn submit_to_store(
    draft: ReportDraft,
    policy: &Policy,
    store: &mut ReportStore,
) -> Result<Submission, ReportError> {
    let submission = submit(draft, policy)?;
    store.append(submission.report.clone())?;
    Ok(submission)
}
