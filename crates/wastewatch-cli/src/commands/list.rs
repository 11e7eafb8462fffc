use wastewatch_core::dashboard::{self, DashboardFilter};
use wastewatch_core::error::ReportError;
use wastewatch_core::model::Status;
use wastewatch_core::store::ReportStore;

use crate::output;
use crate::settings::Settings;

pub fn run(
    settings: &Settings,
    statuses: &[String],
    with_images: bool,
    output_format: &str,
) -> Result<(), ReportError> {
    let filter = parse_filter(statuses)?;
    let store = ReportStore::open(&settings.store)?;

    if with_images {
        let review = dashboard::image_review(store.reports(), &filter);
        match output_format {
            "json" => output::json::print(&review)?,
            _ => output::table::print_image_review(&review, &settings.images),
        }
        return Ok(());
    }

    let view = dashboard::project(store.reports(), &filter);
    match output_format {
        "json" => output::json::print(&view)?,
        _ => {
            let options = dashboard::status_options(store.reports());
            output::table::print_dashboard(&view, &options);
        }
    }

    Ok(())
}

fn parse_filter(statuses: &[String]) -> Result<DashboardFilter, ReportError> {
    let mut parsed = Vec::new();
    for s in statuses {
        let status =
            Status::from_str_loose(s).ok_or_else(|| ReportError::UnknownStatus(s.clone()))?;
        parsed.push(status);
    }
    Ok(DashboardFilter::only(parsed))
}
