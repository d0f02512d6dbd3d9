//! Logits → probabilities → label resolution

use serde::Serialize;
use tracing::debug;

use crate::labels::{LabelEntry, LabelTable};
use crate::InferenceError;

/// Outcome of one classification request
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    /// Index into the active label table (after any remapping)
    pub predicted_index: usize,
    /// Probability mass of the winning model class (0.0 to 1.0)
    pub confidence: f32,
    /// Softmax distribution over the model's classes
    pub probabilities: Vec<f32>,
    /// Resolved display record
    pub label: LabelEntry,
}

/// Numerically stable softmax over a logit vector.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest probability. Ties go to the lowest index.
pub fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    probs
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
}

/// Whether a binary-trained model is being shown through the ternary table.
pub fn binary_to_ternary_applies(model_classes: usize, labels: &LabelTable) -> bool {
    model_classes == 2 && labels.len() == 3
}

/// Compatibility shim for a binary-trained model shown through the ternary
/// table: raw class 1 (positive) maps to index 2, raw class 0 is unchanged.
///
/// Outside that pairing the raw index is returned as-is.
pub fn remap_binary_to_ternary(
    raw_index: usize,
    model_classes: usize,
    labels: &LabelTable,
) -> usize {
    if !binary_to_ternary_applies(model_classes, labels) {
        return raw_index;
    }
    match raw_index {
        1 => 2,
        other => other,
    }
}

/// Convert raw model logits into an [`InferenceResult`].
pub fn resolve(
    logits: &[f32],
    model_classes: usize,
    labels: &LabelTable,
) -> Result<InferenceResult, InferenceError> {
    if logits.len() != model_classes {
        return Err(InferenceError::InferenceFailed(format!(
            "expected {} logits, got {}",
            model_classes,
            logits.len()
        )));
    }
    if logits.iter().any(|x| !x.is_finite()) {
        return Err(InferenceError::InferenceFailed(
            "model produced non-finite logits".to_string(),
        ));
    }

    let probabilities = softmax(logits);
    let (raw_index, confidence) = argmax(&probabilities)
        .ok_or_else(|| InferenceError::InferenceFailed("model produced no logits".to_string()))?;

    let predicted_index = remap_binary_to_ternary(raw_index, model_classes, labels);

    let label = *labels
        .get(predicted_index)
        .ok_or(InferenceError::LabelOutOfRange {
            index: predicted_index,
            len: labels.len(),
        })?;

    debug!(
        raw_index,
        predicted_index,
        confidence,
        label = label.name,
        "resolved prediction"
    );

    Ok(InferenceResult {
        predicted_index,
        confidence,
        probabilities,
        label,
    })
}
