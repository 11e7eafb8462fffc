//! Integration tests for the submit -> store -> dashboard pipeline.
//!
//! Uses a MockClassifier that returns canned predictions without running
//! any inference program, and tempfile directories for the store and images.

use wastewatch_core::attachment::ImageStore;
use wastewatch_core::classifier::{
    suggest_waste_type, FallbackClassifier, ImageClassifier, LabelMap, Prediction,
};
use wastewatch_core::dashboard::{self, DashboardFilter};
use wastewatch_core::error::ReportError;
use wastewatch_core::factory::ReportDraft;
use wastewatch_core::model::{ImageAttachment, PredictedArea, Priority, Status, WasteType};
use wastewatch_core::policy::builtin::load_preset;
use wastewatch_core::store::{self, ReportStore, ReportUpdate};
use wastewatch_core::{submit, submit_to_store};

struct MockClassifier {
    predictions: Vec<(&'static str, f64)>,
}

impl ImageClassifier for MockClassifier {
    fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
        Ok(self
            .predictions
            .iter()
            .map(|(label, probability)| Prediction {
                label: label.to_string(),
                probability: *probability,
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingClassifier;

impl ImageClassifier for FailingClassifier {
    fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
        Err(ReportError::Classifier {
            backend: "quantized".into(),
            reason: "model file not found".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "quantized"
    }
}

const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

// ---------------------------------------------------------------------------
// Test 1: Detailed report is valid and goes to the local crew
// ---------------------------------------------------------------------------
#[test]
fn detailed_report_assigned_to_local_crew() {
    let policy = load_preset("default").unwrap();
    let draft = ReportDraft::new(
        "123 Main Street",
        WasteType::GeneralTrash,
        "Large pile of furniture and debris blocking the sidewalk",
    );

    let submission = submit(draft, &policy).unwrap();
    let report = &submission.report;

    assert!(submission.routed);
    assert_eq!(report.is_valid, Some(true));
    assert_eq!(report.predicted_area, Some(PredictedArea::UrbanCleanupSectorA));
    assert_eq!(report.priority, Some(Priority::High));
    assert_eq!(report.status_label(), "Assigned to Local Crew (24 hr target)");
}

// ---------------------------------------------------------------------------
// Test 2: Vague report is kept but never routed
// ---------------------------------------------------------------------------
#[test]
fn vague_report_left_unrouted() {
    let policy = load_preset("default").unwrap();
    let submission = submit(
        ReportDraft::new("here", WasteType::GeneralTrash, "trash"),
        &policy,
    )
    .unwrap();
    let report = &submission.report;

    assert!(!submission.routed);
    assert_eq!(report.is_valid, Some(false));
    assert_eq!(report.predicted_area, Some(PredictedArea::ValidationPending));
    assert_eq!(report.status, Status::New);
    assert!(report.priority.is_none());
    assert!(report.target_hours.is_none());
}

// ---------------------------------------------------------------------------
// Test 3: Hazardous waste gets its own area; routing depends on validity
// ---------------------------------------------------------------------------
#[test]
fn hazardous_area_and_critical_priority() {
    let policy = load_preset("default").unwrap();

    let vague = submit(ReportDraft::new("x", WasteType::Hazardous, "y"), &policy).unwrap();
    assert_eq!(
        vague.report.predicted_area,
        Some(PredictedArea::HazardousWasteZone)
    );
    assert!(!vague.routed);

    let detailed = submit(
        ReportDraft::new(
            "Behind the old bus depot",
            WasteType::Hazardous,
            "Several leaking paint cans and car batteries",
        ),
        &policy,
    )
    .unwrap();
    assert_eq!(detailed.report.priority, Some(Priority::Critical));
    assert_eq!(
        detailed.report.status_label(),
        "Awaiting Specialized Team Dispatch"
    );
}

// ---------------------------------------------------------------------------
// Test 4: Photo-only validity follows the policy
// ---------------------------------------------------------------------------
#[test]
fn photo_validity_depends_on_policy() {
    let dir = tempfile::tempdir().unwrap();
    let images = ImageStore::new(dir.path().join("images"));
    let image = images.save(JPEG).unwrap();
    assert!(image.is_stored());

    let draft = ReportDraft::new("here", WasteType::Recyclables, "cans").with_image(image);

    let with_photo = submit(draft.clone(), &load_preset("default").unwrap()).unwrap();
    assert!(with_photo.routed);
    assert_eq!(
        with_photo.report.predicted_area,
        Some(PredictedArea::UrbanCleanupSectorA)
    );
    assert_eq!(with_photo.report.priority, Some(Priority::High));

    let text_only = submit(draft, &load_preset("text-only").unwrap()).unwrap();
    assert!(!text_only.routed);
    assert_eq!(text_only.report.status, Status::New);
}

// ---------------------------------------------------------------------------
// Test 5: Missing fields are rejected and nothing is stored
// ---------------------------------------------------------------------------
#[test]
fn missing_fields_rejected_before_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ReportStore::open(dir.path().join("reports.jsonl")).unwrap();
    let policy = load_preset("default").unwrap();

    let err = submit_to_store(
        ReportDraft::new("", WasteType::Other, "something"),
        &policy,
        &mut store,
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::MissingField("location")));
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

// ---------------------------------------------------------------------------
// Test 6: Store round-trip preserves reports
// ---------------------------------------------------------------------------
#[test]
fn store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    let policy = load_preset("default").unwrap();
    let mut store = ReportStore::open(&path).unwrap();

    let failed_upload = ReportDraft::new("here", WasteType::Other, "mattress")
        .reported_by("Sam")
        .with_image(ImageAttachment::Failed {
            reason: "permission denied".into(),
        });
    let first = submit_to_store(failed_upload, &policy, &mut store).unwrap();
    let second = submit_to_store(
        ReportDraft::new(
            "Corner of 5th and Pine",
            WasteType::ConstructionDebris,
            "Broken drywall and tiles dumped next to the bins",
        ),
        &policy,
        &mut store,
    )
    .unwrap();

    let reloaded = store::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0], first.report);
    assert_eq!(reloaded[1], second.report);
    assert_eq!(reloaded[0].reported_by.as_deref(), Some("Sam"));
}

// ---------------------------------------------------------------------------
// Test 7: Duplicate ids are refused
// ---------------------------------------------------------------------------
#[test]
fn duplicate_id_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ReportStore::open(dir.path().join("reports.jsonl")).unwrap();
    let policy = load_preset("default").unwrap();

    let submission = submit_to_store(
        ReportDraft::new("1 2 3", WasteType::Other, "x"),
        &policy,
        &mut store,
    )
    .unwrap();

    let err = store.append(submission.report).unwrap_err();
    assert!(matches!(err, ReportError::DuplicateId(_)));
    assert_eq!(store.len(), 1);
}

// ---------------------------------------------------------------------------
// Test 8: Manual resolution is the only backward-looking mutation
// ---------------------------------------------------------------------------
#[test]
fn manual_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    let policy = load_preset("text-only").unwrap();
    let mut store = ReportStore::open(&path).unwrap();

    // the pipeline routes every valid non-hazardous report to a crew; queue one by hand
    let mut queued = submit(
        ReportDraft::new(
            "Riverside park east entrance",
            WasteType::Recyclables,
            "Overflowing recycling bins with bottles on the grass",
        ),
        &policy,
    )
    .unwrap()
    .report;
    queued.status = Status::QueuedStandardPickup;
    queued.priority = Some(Priority::Medium);
    queued.target_hours = Some(72);
    assert_eq!(
        queued.status_label(),
        "Queued for Standard Pickup (72 hr target)"
    );
    let id = queued.id.clone();
    store.append(queued).unwrap();

    let resolved = store.resolve(&id).unwrap();
    assert_eq!(resolved.status, Status::Resolved);
    assert_eq!(resolved.priority, Some(Priority::Resolved));
    assert!(resolved.target_hours.is_none());

    // persisted, and cannot be resolved twice
    let reloaded = store::load(&path).unwrap();
    assert_eq!(reloaded[0].status, Status::Resolved);
    assert!(matches!(
        store.resolve(&id),
        Err(ReportError::InvalidTransition { .. })
    ));
}

// ---------------------------------------------------------------------------
// Test 9: Unrouted and unknown reports cannot be resolved
// ---------------------------------------------------------------------------
#[test]
fn resolve_requires_routed_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ReportStore::open(dir.path().join("reports.jsonl")).unwrap();
    let policy = load_preset("default").unwrap();

    let vague = submit_to_store(
        ReportDraft::new("here", WasteType::GeneralTrash, "trash"),
        &policy,
        &mut store,
    )
    .unwrap();

    assert!(matches!(
        store.resolve(&vague.report.id),
        Err(ReportError::InvalidTransition { .. })
    ));
    assert!(matches!(
        store.resolve(&"no-such-id".into()),
        Err(ReportError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Test 10: Dashboard reflects the store and is stable across calls
// ---------------------------------------------------------------------------
#[test]
fn dashboard_over_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    let policy = load_preset("default").unwrap();
    let mut store = ReportStore::open(&path).unwrap();

    submit_to_store(
        ReportDraft::new("here", WasteType::GeneralTrash, "trash"),
        &policy,
        &mut store,
    )
    .unwrap();
    let routed = submit_to_store(
        ReportDraft::new(
            "123 Main Street",
            WasteType::GeneralTrash,
            "Large pile of furniture and debris blocking the sidewalk",
        ),
        &policy,
        &mut store,
    )
    .unwrap();

    let all = dashboard::project(store.reports(), &DashboardFilter::all());
    assert_eq!(all.total, 2);
    assert_eq!(all.pending, 1);
    assert_eq!(all.new_count, 1);
    assert_eq!(all, dashboard::project(store.reports(), &DashboardFilter::all()));

    let crew = dashboard::project(
        store.reports(),
        &DashboardFilter::only([Status::AssignedLocalCrew]),
    );
    assert_eq!(crew.rows.len(), 1);
    assert_eq!(crew.rows[0].id, routed.report.id);

    store.resolve(&routed.report.id).unwrap();
    store.reload().unwrap();
    let after = dashboard::project(store.reports(), &DashboardFilter::all());
    assert_eq!(after.pending, 0);
    assert!(dashboard::resolvable(store.reports()).is_empty());
}

// ---------------------------------------------------------------------------
// Test 11: Classifier fallback pre-fills the waste type
// ---------------------------------------------------------------------------
#[test]
fn classifier_fallback_suggests_waste_type() {
    let classifier = FallbackClassifier::new(vec![
        Box::new(FailingClassifier),
        Box::new(MockClassifier {
            predictions: vec![("Battery", 0.7), ("Metal", 0.2), ("Plastic", 0.1)],
        }),
    ]);
    let map = LabelMap::builtin().unwrap();

    let predictions = classifier.classify(JPEG).unwrap();
    assert_eq!(
        suggest_waste_type(&predictions, &map),
        Some(WasteType::Hazardous)
    );

    let exhausted = FallbackClassifier::new(vec![Box::new(FailingClassifier)]);
    assert!(matches!(
        exhausted.classify(JPEG),
        Err(ReportError::ClassifierExhausted { .. })
    ));
}

// ---------------------------------------------------------------------------
// Test 12: Stored reports accept no change other than resolution
// ---------------------------------------------------------------------------
#[test]
fn stored_reports_only_change_by_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.jsonl");
    let policy = load_preset("default").unwrap();
    let mut store = ReportStore::open(&path).unwrap();

    let vague = submit_to_store(
        ReportDraft::new("here", WasteType::GeneralTrash, "trash"),
        &policy,
        &mut store,
    )
    .unwrap()
    .report;
    assert_eq!(vague.is_valid, Some(false));

    let routed = store.update(
        &vague.id,
        ReportUpdate {
            status: Some(Status::AssignedLocalCrew),
            priority: Some(Priority::High),
            ..ReportUpdate::default()
        },
    );
    assert!(matches!(routed, Err(ReportError::InvalidTransition { .. })));

    let detailed = submit_to_store(
        ReportDraft::new(
            "Lot behind the community center",
            WasteType::ConstructionDebris,
            "Stack of broken pallets and plasterboard by the fence",
        ),
        &policy,
        &mut store,
    )
    .unwrap()
    .report;
    store.resolve(&detailed.id).unwrap();

    let rewritten = store.update(
        &detailed.id,
        ReportUpdate {
            status: None,
            priority: Some(Priority::Critical),
            target_hours: Some(Some(1)),
        },
    );
    assert!(matches!(rewritten, Err(ReportError::InvalidTransition { .. })));

    let reloaded = store::load(&path).unwrap();
    assert_eq!(reloaded[0].status, Status::New);
    assert!(reloaded[0].priority.is_none());
    assert_eq!(reloaded[1].status_label(), "Resolved");
    assert_eq!(reloaded[1].priority, Some(Priority::Resolved));
}
