use crate::error::ReportError;
use crate::policy::schema::Policy;

const DEFAULT_POLICY_JSON: &str = include_str!("../../../../policies/default.json");
const TEXT_ONLY_POLICY_JSON: &str = include_str!("../../../../policies/text-only.json");

/// Available predefined policies.
pub const PRESETS: &[&str] = &["default", "text-only"];

/// Load a predefined policy by name.
pub fn load_preset(name: &str) -> Result<Policy, ReportError> {
    match name {
        "default" => super::parse_policy_str(DEFAULT_POLICY_JSON),
        "text-only" => super::parse_policy_str(TEXT_ONLY_POLICY_JSON),
        _ => Err(ReportError::PolicyInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The policy used when none is configured.
pub fn default_policy() -> Result<Policy, ReportError> {
    load_preset("default")
}
