use crate::classifier::{normalize, rank, softmax, ImageClassifier, Prediction};
use crate::error::ReportError;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How the scores printed by the inference program are to be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// Raw float logits; softmax is applied.
    #[default]
    Logits,
    /// Already probabilities; re-normalized.
    Probabilities,
    /// Integer (e.g. uint8) outputs; divided by their sum.
    Quantized,
}

#[derive(Debug, Deserialize)]
struct ModelOutput {
    scores: Vec<f64>,
    #[serde(default)]
    kind: ScoreKind,
}

/// Classification backend that shells out to an inference program.
///
/// The program is called with the image path as its last argument and must
/// print `{"scores": [...], "kind": "logits" | "probabilities" | "quantized"}`
/// on stdout, one score per label.
pub struct CommandClassifier {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    labels: Vec<String>,
}

impl CommandClassifier {
    pub fn new(program: impl Into<PathBuf>, labels: Vec<String>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "command".to_string());
        Self {
            name,
            program,
            args: Vec::new(),
            labels,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn fail(&self, reason: impl Into<String>) -> ReportError {
        ReportError::Classifier {
            backend: self.name.clone(),
            reason: reason.into(),
        }
    }

    fn probabilities(&self, output: ModelOutput) -> Result<Vec<f64>, ReportError> {
        if output.scores.len() != self.labels.len() {
            return Err(self.fail(format!(
                "model returned {} scores for {} labels",
                output.scores.len(),
                self.labels.len()
            )));
        }
        if output.scores.is_empty() {
            return Err(self.fail("model returned no scores"));
        }
        match output.kind {
            ScoreKind::Logits => Ok(softmax(&output.scores)),
            ScoreKind::Probabilities | ScoreKind::Quantized => normalize(&output.scores)
                .ok_or_else(|| self.fail("scores cannot be normalized")),
        }
    }
}

impl ImageClassifier for CommandClassifier {
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
        let mut tmpfile = tempfile::Builder::new()
            .prefix("wastewatch-")
            .tempfile()
            .map_err(|e| self.fail(e.to_string()))?;
        tmpfile
            .write_all(image)
            .map_err(|e| self.fail(e.to_string()))?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(tmpfile.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    self.fail(format!("program {} not found", self.program.display()))
                } else {
                    self.fail(e.to_string())
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.fail(format!("exit code {code}: {}", stderr.trim())));
        }

        let parsed: ModelOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| self.fail(format!("unreadable model output: {e}")))?;
        let probabilities = self.probabilities(parsed)?;
        Ok(rank(&self.labels, &probabilities))
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}

/// Read a labels file: one label per line, blank lines ignored.
pub fn load_labels(path: &Path) -> Result<Vec<String>, ReportError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
