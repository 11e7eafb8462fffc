use crate::error::ReportError;
use crate::model::{ImageAttachment, Report, ReportId, Status, WasteType};
use chrono::{DateTime, Utc};

/// Raw field values from the submission form.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub location: String,
    pub waste_type: WasteType,
    pub description: String,
    pub reported_by: Option<String>,
    pub image: ImageAttachment,
}

impl ReportDraft {
    pub fn new(
        location: impl Into<String>,
        waste_type: WasteType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            waste_type,
            description: description.into(),
            reported_by: None,
            image: ImageAttachment::None,
        }
    }

    pub fn reported_by(mut self, name: impl Into<String>) -> Self {
        self.reported_by = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = image;
        self
    }
}

/// Build a new report from a draft, stamped with `now`.
///
/// Fails if the location or description is blank. The report starts as
/// `Status::New` with validation and routing fields unset.
pub fn build_report(draft: ReportDraft, now: DateTime<Utc>) -> Result<Report, ReportError> {
    if draft.location.trim().is_empty() {
        return Err(ReportError::MissingField("location"));
    }
    if draft.description.trim().is_empty() {
        return Err(ReportError::MissingField("description"));
    }

    let reported_by = draft
        .reported_by
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(Report {
        id: ReportId::generate(),
        location: draft.location,
        waste_type: draft.waste_type,
        description: draft.description,
        reported_by,
        timestamp: Some(now),
        status: Status::New,
        target_hours: None,
        is_valid: None,
        predicted_area: None,
        priority: None,
        image: draft.image,
    })
}

pub fn build_report_now(draft: ReportDraft) -> Result<Report, ReportError> {
    build_report(draft, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_location_rejected() {
        let draft = ReportDraft::new("   ", WasteType::GeneralTrash, "a pile of bags");
        let err = build_report_now(draft).unwrap_err();
        assert!(matches!(err, ReportError::MissingField("location")));
    }

    #[test]
    fn test_empty_description_rejected() {
        let draft = ReportDraft::new("123 Main Street", WasteType::GeneralTrash, "");
        let err = build_report_now(draft).unwrap_err();
        assert!(matches!(err, ReportError::MissingField("description")));
    }

    #[test]
    fn test_new_report_starts_unvalidated() {
        let now = Utc::now();
        let draft = ReportDraft::new("123 Main Street", WasteType::Recyclables, "bottles");
        let report = build_report(draft, now).unwrap();
        assert_eq!(report.status, Status::New);
        assert_eq!(report.timestamp, Some(now));
        assert!(report.is_valid.is_none());
        assert!(report.predicted_area.is_none());
        assert!(report.priority.is_none());
        assert!(report.target_hours.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = build_report_now(ReportDraft::new("a b c", WasteType::Other, "x")).unwrap();
        let b = build_report_now(ReportDraft::new("a b c", WasteType::Other, "x")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_reporter_dropped() {
        let draft = ReportDraft::new("a b c", WasteType::Other, "x").reported_by("  ");
        let report = build_report_now(draft).unwrap();
        assert!(report.reported_by.is_none());
    }
}
