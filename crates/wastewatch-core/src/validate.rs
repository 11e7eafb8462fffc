use crate::model::{PredictedArea, Report, WasteType};
use crate::policy::schema::ValidationPolicy;
use tracing::debug;

/// Validity flag and coarse area label computed for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub predicted_area: PredictedArea,
}

/// Compute validity and predicted area. Pure; never fails.
pub fn validate(report: &Report, policy: &ValidationPolicy) -> Validation {
    let location_valid = report.location.split_whitespace().count() >= policy.min_location_words;
    let description_detailed = report.description.chars().count() > policy.min_description_chars;
    let has_image = report.image.is_stored();

    let is_valid =
        (location_valid && description_detailed) || (policy.image_sufficient && has_image);

    let predicted_area = area_for(report.waste_type, is_valid);

    debug!(
        id = %report.id,
        location_valid,
        description_detailed,
        has_image,
        is_valid,
        area = %predicted_area,
        "validated report"
    );

    Validation {
        is_valid,
        predicted_area,
    }
}

fn area_for(waste_type: WasteType, is_valid: bool) -> PredictedArea {
    if waste_type == WasteType::Hazardous {
        PredictedArea::HazardousWasteZone
    } else if is_valid {
        PredictedArea::UrbanCleanupSectorA
    } else {
        PredictedArea::ValidationPending
    }
}

/// Validate and record the result on the report.
///
/// Validity is set once: a report that already carries a verdict keeps it.
/// A missing area is filled in from that stored verdict.
pub fn apply_validation(report: &mut Report, policy: &ValidationPolicy) -> Validation {
    if let Some(is_valid) = report.is_valid {
        let waste_type = report.waste_type;
        let predicted_area = *report
            .predicted_area
            .get_or_insert_with(|| area_for(waste_type, is_valid));
        return Validation {
            is_valid,
            predicted_area,
        };
    }
    let validation = validate(report, policy);
    report.is_valid = Some(validation.is_valid);
    report.predicted_area = Some(validation.predicted_area);
    validation
}
