use std::path::PathBuf;
use wastewatch_core::attachment::ImageStore;
use wastewatch_core::classifier::{suggest_waste_type, ImageClassifier};
use wastewatch_core::error::ReportError;
use wastewatch_core::factory::ReportDraft;
use wastewatch_core::model::{ImageAttachment, WasteType};
use wastewatch_core::store::ReportStore;

use crate::commands::classify;
use crate::output;
use crate::settings::Settings;
use crate::ClassifierArgs;

/// Raw values typed into the report form.
pub struct Form {
    pub location: String,
    pub description: String,
    pub waste_type: Option<String>,
    pub reported_by: Option<String>,
    pub image: Option<PathBuf>,
}

pub fn run(
    settings: &Settings,
    form: Form,
    classifier_args: &ClassifierArgs,
    output_format: &str,
) -> Result<(), ReportError> {
    let policy = settings.policy()?;

    // Explicit choice wins; otherwise the photo's top prediction; otherwise General Trash.
    let explicit = match form.waste_type.as_deref() {
        Some(s) => Some(
            WasteType::from_str_loose(s).ok_or_else(|| ReportError::UnknownWasteType(s.into()))?,
        ),
        None => None,
    };

    let image_bytes = match &form.image {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    let suggested = match (&explicit, &image_bytes) {
        (None, Some(bytes)) => match suggest_from_image(bytes, classifier_args) {
            Ok(suggestion) => suggestion,
            Err(e) => {
                eprintln!("warning: no waste type suggestion: {e}");
                None
            }
        },
        _ => None,
    };
    let waste_type = explicit.or(suggested).unwrap_or_default();

    // Reject blank fields before anything is written to disk.
    if form.location.trim().is_empty() {
        return Err(ReportError::MissingField("location"));
    }
    if form.description.trim().is_empty() {
        return Err(ReportError::MissingField("description"));
    }

    let mut store = ReportStore::open(&settings.store)?;

    let images = ImageStore::new(&settings.images);
    let image = match &image_bytes {
        Some(bytes) => images.save(bytes)?,
        None => ImageAttachment::None,
    };
    if let ImageAttachment::Failed { ref reason } = image {
        eprintln!("warning: could not save image locally: {reason}");
    }

    let mut draft =
        ReportDraft::new(form.location, waste_type, form.description).with_image(image.clone());
    if let Some(name) = form.reported_by {
        draft = draft.reported_by(name);
    }

    let submission = match wastewatch_core::submit_to_store(draft, &policy, &mut store) {
        Ok(submission) => submission,
        Err(e) => {
            if let Err(cleanup) = images.discard(&image) {
                tracing::warn!(error = %cleanup, "could not remove image of unsaved report");
            }
            return Err(e);
        }
    };

    match output_format {
        "json" => output::json::print(&submission.report)?,
        _ => output::table::print_submission(&submission, suggested, &policy.validation),
    }

    Ok(())
}

fn suggest_from_image(
    bytes: &[u8],
    classifier_args: &ClassifierArgs,
) -> Result<Option<WasteType>, ReportError> {
    let classifier = classify::build_classifier(classifier_args)?;
    if classifier.is_empty() {
        return Ok(None);
    }
    let map = classify::label_map(classifier_args)?;
    let predictions = classifier.classify(bytes)?;
    Ok(suggest_waste_type(&predictions, &map))
}
