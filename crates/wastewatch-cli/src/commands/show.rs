use wastewatch_core::attachment::ImageStore;
use wastewatch_core::error::ReportError;
use wastewatch_core::store::ReportStore;

use crate::output;
use crate::settings::Settings;

pub fn run(settings: &Settings, id: &str, output_format: &str) -> Result<(), ReportError> {
    let store = ReportStore::open(&settings.store)?;
    let report = store.find_by_prefix(id)?;

    match output_format {
        "json" => output::json::print(report)?,
        _ => {
            let lookup = ImageStore::new(&settings.images).locate(&report.image);
            output::table::print_report(report, &lookup);
        }
    }

    Ok(())
}
