//! Sentiment Engine Implementation

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::classifier::SequenceClassifier;
use crate::labels::LabelTable;
use crate::resolver::{binary_to_ternary_applies, resolve, InferenceResult};
use crate::InferenceError;

/// Reject blank input before any model work is done.
pub fn validate_input(text: &str) -> Result<&str, InferenceError> {
    if text.trim().is_empty() {
        return Err(InferenceError::EmptyInput);
    }
    Ok(text)
}

/// Loaded classifier paired with the label table it is displayed through
pub struct SentimentEngine {
    classifier: Box<dyn SequenceClassifier>,
    labels: LabelTable,
}

impl SentimentEngine {
    /// Pair a classifier with a label table.
    ///
    /// Fails when the model's class count cannot be displayed through the
    /// table. A binary model under the ternary table is accepted through
    /// [`crate::remap_binary_to_ternary`].
    pub fn new(
        classifier: Box<dyn SequenceClassifier>,
        labels: LabelTable,
    ) -> Result<Self, InferenceError> {
        let classes = classifier.num_classes();
        let remapped = binary_to_ternary_applies(classes, &labels);
        if classes != labels.len() && !remapped {
            return Err(InferenceError::ModelLoad(format!(
                "model has {} output classes but the {} label table has {} entries",
                classes,
                labels.cardinality().as_str(),
                labels.len()
            )));
        }
        if remapped {
            warn!("Binary model displayed through ternary labels; positive class is remapped");
        }

        info!(
            "Sentiment engine ready: {} model classes, {} labels",
            classes,
            labels.cardinality().as_str()
        );
        Ok(Self { classifier, labels })
    }

    /// Classify `text` and resolve it to a label entry
    pub fn analyze(&self, text: &str) -> Result<InferenceResult, InferenceError> {
        let text = validate_input(text)?;
        let start = Instant::now();

        let logits = self.classifier.logits(text)?;
        let result = resolve(&logits, self.classifier.num_classes(), &self.labels)?;

        debug!(
            "Inference completed in {}ms: {} ({:.4})",
            start.elapsed().as_millis(),
            result.label.name,
            result.confidence
        );
        Ok(result)
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn model_classes(&self) -> usize {
        self.classifier.num_classes()
    }
}
