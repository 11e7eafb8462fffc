//! Flat-file report store.
//!
//! Reports are kept as JSON Lines: one flat object per report with a fixed
//! column set. The whole file is rewritten on every mutation. There is no
//! locking; with several writers the last full rewrite wins.

use crate::error::ReportError;
use crate::model::{
    ImageAttachment, PredictedArea, Priority, Report, ReportId, Status, WasteType,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Legacy `Image_Filename` marker for an upload that could not be saved.
const LEGACY_FAILED_IMAGE: &str = "Saving Failed";

/// One persisted row. Field names are the column names on disk.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Waste_Type")]
    waste_type: WasteType,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Reported_By", default)]
    reported_by: Option<String>,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
    #[serde(rename = "Target_Hours", default)]
    target_hours: Option<u32>,
    #[serde(rename = "Is_Valid", default)]
    is_valid: Option<bool>,
    #[serde(rename = "Predicted_Area", default)]
    predicted_area: Option<PredictedArea>,
    #[serde(rename = "Priority", default)]
    priority: Option<Priority>,
    #[serde(rename = "Image_Filename", default)]
    image_filename: Option<String>,
    #[serde(rename = "Image_Error", default)]
    image_error: Option<String>,
}

impl From<&Report> for StoredRow {
    fn from(report: &Report) -> Self {
        let (image_filename, image_error) = match &report.image {
            ImageAttachment::None => (None, None),
            ImageAttachment::Stored { filename } => (Some(filename.clone()), None),
            ImageAttachment::Failed { reason } => (None, Some(reason.clone())),
        };

        StoredRow {
            id: report.id.to_string(),
            location: report.location.clone(),
            waste_type: report.waste_type,
            description: report.description.clone(),
            reported_by: report.reported_by.clone(),
            timestamp: report.timestamp.map(|t| t.to_rfc3339()),
            status: Some(report.status.tag().to_string()),
            target_hours: report.target_hours,
            is_valid: report.is_valid,
            predicted_area: report.predicted_area,
            priority: report.priority,
            image_filename,
            image_error,
        }
    }
}

impl TryFrom<StoredRow> for Report {
    type Error = String;

    fn try_from(row: StoredRow) -> Result<Self, Self::Error> {
        let (status, legacy_target) = match row.status.as_deref() {
            None => (Status::New, None),
            Some(s) if s.trim().is_empty() => (Status::New, None),
            Some(s) => parse_status(s).ok_or_else(|| format!("unknown status '{s}'"))?,
        };

        let image = match (row.image_filename, row.image_error) {
            (_, Some(reason)) => ImageAttachment::Failed { reason },
            (Some(name), None) if name == LEGACY_FAILED_IMAGE => ImageAttachment::Failed {
                reason: LEGACY_FAILED_IMAGE.to_string(),
            },
            (Some(filename), None) if !filename.trim().is_empty() => {
                ImageAttachment::Stored { filename }
            }
            _ => ImageAttachment::None,
        };

        Ok(Report {
            id: ReportId::from(row.id),
            location: row.location,
            waste_type: row.waste_type,
            description: row.description,
            reported_by: row.reported_by.filter(|s| !s.is_empty()),
            timestamp: row.timestamp.as_deref().and_then(parse_timestamp),
            status,
            target_hours: row.target_hours.or(legacy_target),
            is_valid: row.is_valid,
            predicted_area: row.predicted_area,
            priority: row.priority,
            image,
        })
    }
}

/// Parse a stored status: the tag, the label, or a legacy label carrying its
/// target, e.g. "Assigned to Local Crew (24 hr target)".
fn parse_status(s: &str) -> Option<(Status, Option<u32>)> {
    if let Some(status) = Status::from_str_loose(s) {
        return Some((status, None));
    }
    let (label, rest) = s.trim().split_once(" (")?;
    let hours = rest.strip_suffix(" hr target)")?.trim().parse().ok()?;
    Some((Status::from_str_loose(label)?, Some(hours)))
}

/// Parse a stored timestamp. Anything unreadable becomes `None`.
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DD HH:MM:SS[.f]` form (read as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Field changes for an existing report. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportUpdate {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub target_hours: Option<Option<u32>>,
}

impl ReportUpdate {
    /// The operator's "mark resolved" action.
    pub fn resolution() -> Self {
        Self {
            status: Some(Status::Resolved),
            priority: Some(Priority::Resolved),
            target_hours: Some(None),
        }
    }
}

/// Read every report from `path`. A missing file is an empty table.
pub fn load(path: &Path) -> Result<Vec<Report>, ReportError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "report store not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let corrupt = |idx: usize, reason: String| ReportError::StoreCorrupt {
        path: path.to_path_buf(),
        line: idx + 1,
        reason,
    };

    let mut reports = Vec::new();
    let mut seen = HashSet::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row: StoredRow = serde_json::from_str(line).map_err(|e| corrupt(idx, e.to_string()))?;
        if !seen.insert(row.id.clone()) {
            return Err(corrupt(idx, format!("duplicate id '{}'", row.id)));
        }
        reports.push(Report::try_from(row).map_err(|reason| corrupt(idx, reason))?);
    }
    Ok(reports)
}

/// Rewrite the whole table at `path` via a temporary file and rename.
pub fn save(path: &Path, reports: &[Report]) -> Result<(), ReportError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    for report in reports {
        let line = serde_json::to_string(&StoredRow::from(report))?;
        tmp.write_all(line.as_bytes())?;
        tmp.write_all(b"\n")?;
    }
    tmp.flush()?;
    tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;
    Ok(())
}

/// Handle on the persisted report table.
///
/// The file is the source of truth; the in-memory rows are a cache that
/// `reload` refreshes.
#[derive(Debug)]
pub struct ReportStore {
    path: PathBuf,
    reports: Vec<Report>,
}

impl ReportStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        let reports = load(&path)?;
        info!(path = %path.display(), count = reports.len(), "opened report store");
        Ok(Self { path, reports })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn get(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| &r.id == id)
    }

    /// Find a report by full id or by a unique id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Report, ReportError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(ReportError::NotFound(prefix.to_string()));
        }
        if let Some(exact) = self.reports.iter().find(|r| r.id.as_str() == prefix) {
            return Ok(exact);
        }

        let matches: Vec<&Report> = self
            .reports
            .iter()
            .filter(|r| r.id.as_str().starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(ReportError::NotFound(prefix.to_string())),
            [one] => Ok(*one),
            many => Err(ReportError::AmbiguousId {
                prefix: prefix.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Add one report and rewrite the table.
    pub fn append(&mut self, report: Report) -> Result<(), ReportError> {
        if self.get(&report.id).is_some() {
            return Err(ReportError::DuplicateId(report.id.to_string()));
        }

        let id = report.id.clone();
        self.reports.push(report);
        if let Err(e) = save(&self.path, &self.reports) {
            self.reports.pop();
            return Err(e);
        }
        info!(id = %id, total = self.reports.len(), "appended report");
        Ok(())
    }

    /// Apply field changes to one report and rewrite the table.
    ///
    /// Stored reports only ever move from a routed status to Resolved. Any
    /// other change set, including one without a status, is refused with
    /// `InvalidTransition`.
    pub fn update(&mut self, id: &ReportId, changes: ReportUpdate) -> Result<&Report, ReportError> {
        let idx = self
            .reports
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))?;

        let current = &self.reports[idx];
        let next = changes.status.unwrap_or(current.status);
        let resolving = next == Status::Resolved
            && current.status.can_transition_to(next)
            && matches!(changes.priority, None | Some(Priority::Resolved))
            && matches!(changes.target_hours, None | Some(None));
        if !resolving {
            return Err(ReportError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                to: next,
            });
        }

        let previous = current.clone();
        let report = &mut self.reports[idx];
        if let Some(status) = changes.status {
            report.status = status;
        }
        if let Some(priority) = changes.priority {
            report.priority = Some(priority);
        }
        if let Some(target) = changes.target_hours {
            report.target_hours = target;
        }

        if let Err(e) = save(&self.path, &self.reports) {
            self.reports[idx] = previous;
            return Err(e);
        }
        info!(id = %id, status = %self.reports[idx].status, "updated report");
        Ok(&self.reports[idx])
    }

    /// Mark a routed report resolved.
    pub fn resolve(&mut self, id: &ReportId) -> Result<&Report, ReportError> {
        self.update(id, ReportUpdate::resolution())
    }

    /// Drop the cached rows and read the file again.
    pub fn reload(&mut self) -> Result<(), ReportError> {
        self.reports = load(&self.path)?;
        Ok(())
    }
}
