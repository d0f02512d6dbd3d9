//! Sentiment Engine
//!
//! Loads a pretrained sequence-classification model and resolves its
//! output into a static label table.

mod classifier;
mod engine;
mod labels;
#[cfg(feature = "onnx")]
mod loader;
mod resolver;

pub use classifier::SequenceClassifier;
pub use engine::{validate_input, SentimentEngine};
pub use labels::{LabelCardinality, LabelEntry, LabelTable};
#[cfg(feature = "onnx")]
pub use loader::OnnxClassifier;
pub use resolver::{
    argmax, binary_to_ternary_applies, remap_binary_to_ternary, resolve, softmax, InferenceResult,
};

use thiserror::Error;

/// Tokenizer truncation length used when the configuration does not override it
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 512;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Input text is empty")]
    EmptyInput,
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Label index {index} out of range for table of {len} entries")]
    LabelOutOfRange { index: usize, len: usize },
}
