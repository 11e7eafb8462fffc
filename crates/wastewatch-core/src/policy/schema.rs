use serde::{Deserialize, Serialize};

/// Intake policy: the validation thresholds and routing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub validation: ValidationPolicy,
    #[serde(default)]
    pub routing: RoutingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Minimum number of whitespace-separated words in the location.
    pub min_location_words: usize,
    /// The description must be strictly longer than this many characters.
    pub min_description_chars: usize,
    /// A stored photo alone makes a report valid.
    pub image_sufficient: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_location_words: 3,
            min_description_chars: 30,
            image_sufficient: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingPolicy {
    /// Upgrade medium-priority reports that carry a photo.
    pub visual_upgrade: bool,
    pub local_crew_target_hours: u32,
    pub visual_verified_target_hours: u32,
    pub standard_pickup_target_hours: u32,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            visual_upgrade: true,
            local_crew_target_hours: 24,
            visual_verified_target_hours: 48,
            standard_pickup_target_hours: 72,
        }
    }
}
