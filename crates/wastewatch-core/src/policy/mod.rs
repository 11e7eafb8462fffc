pub mod builtin;
pub mod schema;

use crate::error::ReportError;
use schema::Policy;
use std::path::Path;

/// Load a policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<Policy, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_policy(&content, path)
}

/// Parse a policy from a JSON string.
pub fn parse_policy(json: &str, source: &Path) -> Result<Policy, ReportError> {
    let policy: Policy = serde_json::from_str(json).map_err(|e| ReportError::PolicyLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Parse a policy from a JSON string (no file path context).
pub fn parse_policy_str(json: &str) -> Result<Policy, ReportError> {
    let policy: Policy = serde_json::from_str(json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate that a policy is well-formed.
pub fn validate_policy(policy: &Policy) -> Result<(), ReportError> {
    if policy.name.trim().is_empty() {
        return Err(ReportError::PolicyInvalid("name must not be empty".into()));
    }

    if policy.validation.min_location_words == 0 {
        return Err(ReportError::PolicyInvalid(
            "min_location_words must be at least 1".into(),
        ));
    }

    let routing = &policy.routing;
    for (field, hours) in [
        ("local_crew_target_hours", routing.local_crew_target_hours),
        (
            "visual_verified_target_hours",
            routing.visual_verified_target_hours,
        ),
        (
            "standard_pickup_target_hours",
            routing.standard_pickup_target_hours,
        ),
    ] {
        if hours == 0 {
            return Err(ReportError::PolicyInvalid(format!(
                "{field} must be greater than zero"
            )));
        }
    }

    if routing.local_crew_target_hours > routing.standard_pickup_target_hours {
        return Err(ReportError::PolicyInvalid(format!(
            "local crew target ({} h) is slower than standard pickup ({} h)",
            routing.local_crew_target_hours, routing.standard_pickup_target_hours
        )));
    }

    Ok(())
}
