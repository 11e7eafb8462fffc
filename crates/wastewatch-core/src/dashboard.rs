use crate::model::{
    ImageAttachment, PredictedArea, Priority, Report, ReportId, Status, WasteType,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Status selection for the dashboard. An empty selection shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub statuses: BTreeSet<Status>,
}

impl DashboardFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(statuses: impl IntoIterator<Item = Status>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
        }
    }

    pub fn matches(&self, status: Status) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }
}

/// One displayed row: the bounded column set of the report list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    pub id: ReportId,
    pub short_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub location: String,
    pub waste_type: WasteType,
    pub status: Status,
    pub status_label: String,
    pub priority: Option<Priority>,
    pub predicted_area: Option<PredictedArea>,
    pub image: ImageAttachment,
}

impl From<&Report> for DashboardRow {
    fn from(report: &Report) -> Self {
        DashboardRow {
            id: report.id.clone(),
            short_id: report.id.short().to_string(),
            timestamp: report.timestamp,
            location: report.location.clone(),
            waste_type: report.waste_type,
            status: report.status,
            status_label: report.status_label(),
            priority: report.priority,
            predicted_area: report.predicted_area,
            image: report.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Reports in the whole store.
    pub total: usize,
    /// Reports routed and awaiting a crew or team.
    pub pending: usize,
    pub new_count: usize,
    /// Filtered rows, newest first.
    pub rows: Vec<DashboardRow>,
}

/// Build the dashboard view. Read-only and deterministic.
pub fn project(reports: &[Report], filter: &DashboardFilter) -> DashboardView {
    let mut selected: Vec<&Report> = reports.iter().filter(|r| filter.matches(r.status)).collect();
    sort_newest_first(&mut selected);

    DashboardView {
        total: reports.len(),
        pending: reports.iter().filter(|r| r.is_pending()).count(),
        new_count: reports.iter().filter(|r| r.status == Status::New).count(),
        rows: selected.into_iter().map(DashboardRow::from).collect(),
    }
}

/// Distinct statuses present in the store, in first-seen order.
pub fn status_options(reports: &[Report]) -> Vec<Status> {
    let mut seen = Vec::new();
    for report in reports {
        if !seen.contains(&report.status) {
            seen.push(report.status);
        }
    }
    seen
}

/// Filtered reports that have a stored photo, newest first.
pub fn image_review<'a>(reports: &'a [Report], filter: &DashboardFilter) -> Vec<&'a Report> {
    let mut selected: Vec<&Report> = reports
        .iter()
        .filter(|r| filter.matches(r.status) && r.image.is_stored())
        .collect();
    sort_newest_first(&mut selected);
    selected
}

/// Reports an operator may mark resolved.
pub fn resolvable(reports: &[Report]) -> Vec<&Report> {
    reports.iter().filter(|r| r.is_pending()).collect()
}

// Unknown timestamps sort last; ties keep store order.
fn sort_newest_first(reports: &mut [&Report]) {
    reports.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
