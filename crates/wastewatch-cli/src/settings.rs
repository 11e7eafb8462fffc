//! Runtime settings resolved from flags, environment and `.env`.

use std::path::PathBuf;
use wastewatch_core::error::ReportError;
use wastewatch_core::policy::{self, builtin, schema::Policy};

pub mod defaults {
    pub const STORE_FILE: &str = "waste_reports.jsonl";
    pub const IMAGE_DIR: &str = "images";
    pub const POLICY_PRESET: &str = "default";
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Report table (JSON Lines).
    pub store: PathBuf,
    /// Directory for uploaded photos.
    pub images: PathBuf,
    /// Custom policy file; takes precedence over the preset.
    pub policy_file: Option<PathBuf>,
    pub preset: String,
}

impl Settings {
    pub fn policy(&self) -> Result<Policy, ReportError> {
        match &self.policy_file {
            Some(path) => policy::load_policy(path),
            None => builtin::load_preset(&self.preset),
        }
    }
}
