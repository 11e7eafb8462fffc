use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque report identifier. New ids are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    pub fn generate() -> Self {
        ReportId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 8-character prefix shown in listings.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<String> for ReportId {
    fn from(s: String) -> Self {
        ReportId(s)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        ReportId(s.to_string())
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteType {
    #[serde(rename = "General Trash")]
    #[default]
    GeneralTrash,
    #[serde(rename = "Recyclables")]
    Recyclables,
    #[serde(rename = "Construction Debris")]
    ConstructionDebris,
    #[serde(rename = "Hazardous")]
    Hazardous,
    #[serde(rename = "Other")]
    Other,
}

impl WasteType {
    pub const ALL: [WasteType; 5] = [
        WasteType::GeneralTrash,
        WasteType::Recyclables,
        WasteType::ConstructionDebris,
        WasteType::Hazardous,
        WasteType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WasteType::GeneralTrash => "General Trash",
            WasteType::Recyclables => "Recyclables",
            WasteType::ConstructionDebris => "Construction Debris",
            WasteType::Hazardous => "Hazardous",
            WasteType::Other => "Other",
        }
    }

    /// Accepts labels in any case, with spaces, dashes or underscores.
    pub fn from_str_loose(s: &str) -> Option<WasteType> {
        let key = normalize_key(s);
        WasteType::ALL
            .into_iter()
            .find(|w| normalize_key(w.label()) == key)
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handling state of a report. The response target lives on the report
/// (`target_hours`), not in the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    AwaitingSpecialistDispatch,
    AssignedLocalCrew,
    QueuedStandardPickup,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::New,
        Status::AwaitingSpecialistDispatch,
        Status::AssignedLocalCrew,
        Status::QueuedStandardPickup,
        Status::Resolved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::AwaitingSpecialistDispatch => "Awaiting Specialized Team Dispatch",
            Status::AssignedLocalCrew => "Assigned to Local Crew",
            Status::QueuedStandardPickup => "Queued for Standard Pickup",
            Status::Resolved => "Resolved",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::AwaitingSpecialistDispatch => "awaiting_specialist_dispatch",
            Status::AssignedLocalCrew => "assigned_local_crew",
            Status::QueuedStandardPickup => "queued_standard_pickup",
            Status::Resolved => "resolved",
        }
    }

    /// Label including the response target, e.g. "Assigned to Local Crew (24 hr target)".
    pub fn describe(&self, target_hours: Option<u32>) -> String {
        match target_hours {
            Some(hours) => format!("{} ({} hr target)", self.label(), hours),
            None => self.label().to_string(),
        }
    }

    /// Routed and waiting for a crew or team.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Status::AwaitingSpecialistDispatch
                | Status::AssignedLocalCrew
                | Status::QueuedStandardPickup
        )
    }

    /// New -> routed -> Resolved, nothing else.
    pub fn can_transition_to(&self, next: Status) -> bool {
        match (self, next) {
            (Status::New, n) => n.is_pending(),
            (s, Status::Resolved) => s.is_pending(),
            _ => false,
        }
    }

    /// Accepts the tag or the label, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Status> {
        let key = normalize_key(s);
        Status::ALL
            .into_iter()
            .find(|st| normalize_key(st.tag()) == key || normalize_key(st.label()) == key)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictedArea {
    #[serde(rename = "Hazardous Waste Zone")]
    HazardousWasteZone,
    #[serde(rename = "Urban Cleanup Sector A")]
    UrbanCleanupSectorA,
    #[serde(rename = "Validation Pending/Vague Location")]
    ValidationPending,
}

impl PredictedArea {
    pub fn label(&self) -> &'static str {
        match self {
            PredictedArea::HazardousWasteZone => "Hazardous Waste Zone",
            PredictedArea::UrbanCleanupSectorA => "Urban Cleanup Sector A",
            PredictedArea::ValidationPending => "Validation Pending/Vague Location",
        }
    }
}

impl fmt::Display for PredictedArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Critical (Immediate Action)")]
    Critical,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Medium/High (Visual Verified)")]
    MediumHighVisual,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Resolved")]
    Resolved,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical (Immediate Action)",
            Priority::High => "High",
            Priority::MediumHighVisual => "Medium/High (Visual Verified)",
            Priority::Medium => "Medium",
            Priority::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the optional photo upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageAttachment {
    #[default]
    None,
    Stored {
        filename: String,
    },
    Failed {
        reason: String,
    },
}

impl ImageAttachment {
    pub fn is_stored(&self) -> bool {
        matches!(self, ImageAttachment::Stored { .. })
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            ImageAttachment::Stored { filename } => Some(filename),
            _ => None,
        }
    }
}

impl fmt::Display for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageAttachment::None => f.write_str("-"),
            ImageAttachment::Stored { filename } => f.write_str(filename),
            ImageAttachment::Failed { .. } => f.write_str("(upload failed)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub location: String,
    pub waste_type: WasteType,
    pub description: String,
    pub reported_by: Option<String>,
    /// `None` when a stored timestamp could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub status: Status,
    /// Response target in hours for crew and pickup assignments.
    pub target_hours: Option<u32>,
    pub is_valid: Option<bool>,
    pub predicted_area: Option<PredictedArea>,
    pub priority: Option<Priority>,
    pub image: ImageAttachment,
}

impl Report {
    pub fn status_label(&self) -> String {
        self.status.describe(self.target_hours)
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_type_loose_parsing() {
        assert_eq!(
            WasteType::from_str_loose("general-trash"),
            Some(WasteType::GeneralTrash)
        );
        assert_eq!(
            WasteType::from_str_loose("  CONSTRUCTION_DEBRIS "),
            Some(WasteType::ConstructionDebris)
        );
        assert_eq!(WasteType::from_str_loose("plutonium"), None);
    }

    #[test]
    fn test_status_describe_with_target() {
        assert_eq!(
            Status::AssignedLocalCrew.describe(Some(24)),
            "Assigned to Local Crew (24 hr target)"
        );
        assert_eq!(
            Status::QueuedStandardPickup.describe(Some(72)),
            "Queued for Standard Pickup (72 hr target)"
        );
        assert_eq!(
            Status::AwaitingSpecialistDispatch.describe(None),
            "Awaiting Specialized Team Dispatch"
        );
    }

    #[test]
    fn test_status_transitions_are_monotonic() {
        assert!(Status::New.can_transition_to(Status::AssignedLocalCrew));
        assert!(Status::QueuedStandardPickup.can_transition_to(Status::Resolved));
        assert!(!Status::New.can_transition_to(Status::Resolved));
        assert!(!Status::Resolved.can_transition_to(Status::New));
        assert!(!Status::Resolved.can_transition_to(Status::AssignedLocalCrew));
        assert!(!Status::AssignedLocalCrew.can_transition_to(Status::QueuedStandardPickup));
    }

    #[test]
    fn test_status_from_tag_or_label() {
        assert_eq!(
            Status::from_str_loose("queued_standard_pickup"),
            Some(Status::QueuedStandardPickup)
        );
        assert_eq!(
            Status::from_str_loose("awaiting specialized team dispatch"),
            Some(Status::AwaitingSpecialistDispatch)
        );
        assert_eq!(Status::from_str_loose("done"), None);
    }

    #[test]
    fn test_short_id() {
        let id = ReportId::from("3f2a9c1e-0000-4000-8000-000000000000");
        assert_eq!(id.short(), "3f2a9c1e");
        assert_eq!(ReportId::from("abc").short(), "abc");
    }

    #[test]
    fn test_priority_serializes_as_label() {
        let json = serde_json::to_string(&Priority::MediumHighVisual).unwrap();
        assert_eq!(json, "\"Medium/High (Visual Verified)\"");
    }
}
