use wastewatch_core::dashboard;
use wastewatch_core::error::ReportError;
use wastewatch_core::store::ReportStore;

use crate::settings::Settings;

pub fn run(settings: &Settings, id: Option<&str>) -> Result<(), ReportError> {
    let mut store = ReportStore::open(&settings.store)?;

    let Some(id) = id else {
        let candidates = dashboard::resolvable(store.reports());
        if candidates.is_empty() {
            println!("All submitted and valid reports are currently marked as Resolved or Invalid.");
        } else {
            println!("Reports awaiting action:\n");
            for report in candidates {
                println!(
                    "  {}  {:<30}  {}",
                    report.id.short(),
                    report.location,
                    report.status_label()
                );
            }
        }
        return Ok(());
    };

    let full_id = store.find_by_prefix(id)?.id.clone();
    let resolved = store.resolve(&full_id)?;
    println!("Report {} marked as RESOLVED.", resolved.id.short());

    Ok(())
}
