use std::path::Path;
use wastewatch_core::classifier::command::load_labels;
use wastewatch_core::classifier::{
    suggest_waste_type, CommandClassifier, FallbackClassifier, FixedClassifier, ImageClassifier,
    LabelMap,
};
use wastewatch_core::error::ReportError;

use crate::output;
use crate::ClassifierArgs;

/// Build the ordered classifier chain: inference programs first, manual label last.
pub fn build_classifier(args: &ClassifierArgs) -> Result<FallbackClassifier, ReportError> {
    let mut chain = FallbackClassifier::default();

    if !args.classifier_cmd.is_empty() {
        let labels = match &args.labels {
            Some(path) => load_labels(path)?,
            None => Vec::new(),
        };
        for program in &args.classifier_cmd {
            chain.push(Box::new(CommandClassifier::new(program, labels.clone())));
        }
    }

    if let Some(ref label) = args.label {
        chain.push(Box::new(FixedClassifier::new(label.clone())));
    }

    Ok(chain)
}

pub fn label_map(args: &ClassifierArgs) -> Result<LabelMap, ReportError> {
    match &args.label_map {
        Some(path) => LabelMap::load(path),
        None => LabelMap::builtin(),
    }
}

pub fn run(image: &Path, args: &ClassifierArgs, output_format: &str) -> Result<(), ReportError> {
    let classifier = build_classifier(args)?;
    if classifier.is_empty() {
        return Err(ReportError::ClassifierExhausted {
            attempts: vec!["no classifier configured; pass --classifier-cmd or --label".into()],
        });
    }
    let map = label_map(args)?;

    let bytes = std::fs::read(image)?;
    let predictions = classifier.classify(&bytes)?;
    let suggested = suggest_waste_type(&predictions, &map);

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "predictions": predictions,
            "suggested_waste_type": suggested,
        }))?,
        _ => output::table::print_predictions(&predictions, suggested),
    }

    Ok(())
}
