use std::path::PathBuf;

use crate::model::Status;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("please enter both a location and a detailed description ({0} is empty)")]
    MissingField(&'static str),

    #[error("unsupported image format. Upload a PNG or JPEG image")]
    UnsupportedImage,

    #[error("unknown waste type '{0}'. Expected one of: General Trash, Recyclables, Construction Debris, Hazardous, Other")]
    UnknownWasteType(String),

    #[error("unknown status '{0}'. Expected one of: new, awaiting_specialist_dispatch, assigned_local_crew, queued_standard_pickup, resolved")]
    UnknownStatus(String),

    #[error("no report found with id '{0}'")]
    NotFound(String),

    #[error("id prefix '{prefix}' matches {count} reports; use more characters")]
    AmbiguousId { prefix: String, count: usize },

    #[error("a report with id '{0}' already exists")]
    DuplicateId(String),

    #[error("report '{id}' cannot move from '{from}' to '{to}'")]
    InvalidTransition { id: String, from: Status, to: Status },

    #[error("report store {path} is corrupt at line {line}: {reason}")]
    StoreCorrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to load policy from {path}: {reason}")]
    PolicyLoad { path: PathBuf, reason: String },

    #[error("invalid policy: {0}")]
    PolicyInvalid(String),

    #[error("classifier '{backend}' failed: {reason}")]
    Classifier { backend: String, reason: String },

    #[error("all classifiers failed ({})", attempts.join("; "))]
    ClassifierExhausted { attempts: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
