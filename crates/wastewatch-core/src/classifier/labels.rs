use crate::classifier::Prediction;
use crate::error::ReportError;
use crate::model::WasteType;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_LABELS_JSON: &str = include_str!("../../../../policies/labels.json");

/// Maps classifier labels to the waste types offered on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    entries: BTreeMap<String, WasteType>,
}

impl LabelMap {
    /// The builtin mapping (Plastic, Metal, Organic, Battery, Tire, Unknown).
    pub fn builtin() -> Result<Self, ReportError> {
        Self::parse_str(DEFAULT_LABELS_JSON)
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::PolicyLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse_str(&content).map_err(|e| ReportError::PolicyLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn parse_str(json: &str) -> Result<Self, ReportError> {
        let entries: BTreeMap<String, WasteType> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(ReportError::PolicyInvalid("label map is empty".into()));
        }
        Ok(Self { entries })
    }

    /// Waste type for a label, matched case-insensitively. Unmapped labels are `Other`.
    pub fn waste_type_for(&self, label: &str) -> WasteType {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, waste_type)| *waste_type)
            .unwrap_or(WasteType::Other)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Suggest a waste type from the top prediction only.
pub fn suggest_waste_type(predictions: &[Prediction], map: &LabelMap) -> Option<WasteType> {
    predictions
        .first()
        .map(|top| map.waste_type_for(&top.label))
}
