use std::path::Path;
use wastewatch_core::attachment::ImageLookup;
use wastewatch_core::classifier::Prediction;
use wastewatch_core::dashboard::DashboardView;
use wastewatch_core::model::{Report, Status, WasteType};
use wastewatch_core::policy::schema::ValidationPolicy;
use wastewatch_core::Submission;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_submission(
    submission: &Submission,
    suggested: Option<WasteType>,
    validation: &ValidationPolicy,
) {
    let report = &submission.report;

    if let Some(waste_type) = suggested {
        println!("Suggested waste type from photo: {}\n", waste_type);
    }

    if submission.routed {
        println!("Report is valid. Proceeding to routing.\n");
        println!(
            "  Priority:        {}",
            report.priority.map(|p| p.to_string()).unwrap_or_default()
        );
        println!("  Initial status:  {}", report.status_label());
    } else {
        println!("Report is invalid or vague.\n");
        println!("  Please refine the location and provide a detailed description");
        if validation.image_sufficient {
            println!(
                "  (more than {} characters), or upload a photo, to get it prioritized.",
                validation.min_description_chars
            );
        } else {
            println!(
                "  (more than {} characters) to get it prioritized.",
                validation.min_description_chars
            );
        }
    }
    if let Some(area) = report.predicted_area {
        println!("  Predicted area:  {}", area);
    }
    println!();
    println!("Report ID: {} has been submitted.", report.id.short());
}

pub fn print_dashboard(view: &DashboardView, status_options: &[Status]) {
    if view.total == 0 {
        println!("No reports yet.");
        return;
    }

    println!("Total reports:           {}", view.total);
    println!(
        "Reports awaiting action: {}  ({} new)",
        view.pending, view.new_count
    );
    if !status_options.is_empty() {
        let tags: Vec<&str> = status_options.iter().map(|s| s.tag()).collect();
        println!("Statuses present:        {}", tags.join(", "));
    }
    println!();

    if view.rows.is_empty() {
        println!("No reports match the selected statuses.");
        return;
    }

    let loc_width = column_width(view.rows.iter().map(|r| r.location.as_str()), "Location", 40);
    let status_width = column_width(
        view.rows.iter().map(|r| r.status_label.as_str()),
        "Status",
        45,
    );

    println!(
        "  {:<8}  {:<16}  {:<loc$}  {:<19}  {:<status$}  {:<29}  {:<33}  Image",
        "ID",
        "Timestamp",
        "Location",
        "Waste type",
        "Status",
        "Priority",
        "Predicted area",
        loc = loc_width,
        status = status_width,
    );
    println!(
        "  {}",
        "-".repeat(8 + 16 + loc_width + 19 + status_width + 29 + 33 + 7 * 2 + 5)
    );

    for row in &view.rows {
        let timestamp = row
            .timestamp
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "unknown".into());
        println!(
            "  {:<8}  {:<16}  {:<loc$}  {:<19}  {:<status$}  {:<29}  {:<33}  {}",
            row.short_id,
            timestamp,
            truncate(&row.location, loc_width),
            row.waste_type.label(),
            row.status_label,
            row.priority.map(|p| p.label()).unwrap_or("-"),
            row.predicted_area.map(|a| a.label()).unwrap_or("-"),
            row.image,
            loc = loc_width,
            status = status_width,
        );
    }
}

pub fn print_image_review(reports: &[&Report], image_dir: &Path) {
    if reports.is_empty() {
        println!("No reports with images found in the current filter.");
        return;
    }

    for report in reports {
        let filename = report.image.filename().unwrap_or_default();
        println!(
            "  {} - {} ({})",
            report.id.short(),
            report.location,
            report.waste_type
        );
        println!("    {}", image_dir.join(filename).display());
    }
}

pub fn print_report(report: &Report, image: &ImageLookup) {
    println!("Report {}\n", report.id);
    println!("  Location:        {}", report.location);
    println!("  Waste type:      {}", report.waste_type);
    println!("  Description:     {}", report.description);
    if let Some(ref name) = report.reported_by {
        println!("  Reported by:     {}", name);
    }
    println!(
        "  Submitted:       {}",
        report
            .timestamp
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".into())
    );
    println!("  Status:          {}", report.status_label());
    match report.is_valid {
        Some(true) => println!("  Valid:           yes"),
        Some(false) => println!("  Valid:           no"),
        None => println!("  Valid:           not checked"),
    }
    if let Some(area) = report.predicted_area {
        println!("  Predicted area:  {}", area);
    }
    if let Some(priority) = report.priority {
        println!("  Priority:        {}", priority);
    }

    match image {
        ImageLookup::NoImage => println!("  Image:           none"),
        ImageLookup::UploadFailed(reason) => {
            println!("  Image:           upload failed ({})", reason)
        }
        ImageLookup::Missing(path) => println!(
            "  Image:           file not found on the server: {}",
            path.display()
        ),
        ImageLookup::Available(path) => println!("  Image:           {}", path.display()),
    }
}

pub fn print_predictions(predictions: &[Prediction], suggested: Option<WasteType>) {
    let max_label = predictions
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(5)
        .max(5);

    println!("  {:<width$}  Probability", "Label", width = max_label);
    println!("  {}", "-".repeat(max_label + 13));
    for p in predictions {
        println!(
            "  {:<width$}  {:>10.2}%",
            p.label,
            p.probability * 100.0,
            width = max_label
        );
    }
    println!();
    match suggested {
        Some(waste_type) => println!("Suggested waste type: {}", waste_type),
        None => println!("No suggestion (classifier returned no labels)."),
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str, cap: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
        .min(cap)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
