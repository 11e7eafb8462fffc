use crate::model::{PredictedArea, Priority, Report, Status, WasteType};
use crate::policy::schema::RoutingPolicy;
use tracing::debug;

/// Priority and handling status assigned to a valid report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    pub priority: Priority,
    pub status: Status,
    pub target_hours: Option<u32>,
}

/// Route a validated report. Returns `None` unless the report is valid.
pub fn route(report: &Report, policy: &RoutingPolicy) -> Option<Routing> {
    if report.is_valid != Some(true) {
        return None;
    }

    let mut routing = if report.waste_type == WasteType::Hazardous {
        Routing {
            priority: Priority::Critical,
            status: Status::AwaitingSpecialistDispatch,
            target_hours: None,
        }
    } else if report.predicted_area == Some(PredictedArea::UrbanCleanupSectorA) {
        Routing {
            priority: Priority::High,
            status: Status::AssignedLocalCrew,
            target_hours: Some(policy.local_crew_target_hours),
        }
    } else {
        Routing {
            priority: Priority::Medium,
            status: Status::QueuedStandardPickup,
            target_hours: Some(policy.standard_pickup_target_hours),
        }
    };

    if policy.visual_upgrade && report.image.is_stored() && routing.priority == Priority::Medium {
        routing = Routing {
            priority: Priority::MediumHighVisual,
            status: Status::AssignedLocalCrew,
            target_hours: Some(policy.visual_verified_target_hours),
        };
    }

    debug!(
        id = %report.id,
        priority = %routing.priority,
        status = %routing.status.describe(routing.target_hours),
        "routed report"
    );

    Some(routing)
}

/// Route and record the result on the report. Returns whether it was routed.
pub fn apply_routing(report: &mut Report, policy: &RoutingPolicy) -> bool {
    if report.status != Status::New {
        return false;
    }
    match route(report, policy) {
        Some(routing) => {
            report.priority = Some(routing.priority);
            report.status = routing.status;
            report.target_hours = routing.target_hours;
            true
        }
        None => false,
    }
}
