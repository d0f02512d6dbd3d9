//! Model runtime seam

use crate::InferenceError;

/// A loaded sequence-classification model.
///
/// Implementations tokenize the text and run exactly one forward pass,
/// returning the raw class scores for a batch of one.
pub trait SequenceClassifier: Send + Sync {
    /// Number of output classes the model was trained with
    fn num_classes(&self) -> usize;

    /// Raw logits for `text`, one per class
    fn logits(&self, text: &str) -> Result<Vec<f32>, InferenceError>;
}

