//! ONNX Runtime sequence-classification model loading.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`.
//! An optional Hugging Face `config.json` supplies the class count.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Mutex;

use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::classifier::SequenceClassifier;
use crate::InferenceError;

/// Tokenizer + ONNX session pair, immutable after load.
pub struct OnnxClassifier {
    // `Session::run` takes `&mut self`; weights are never written.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    input_names: Vec<String>,
    num_classes: usize,
}

impl OnnxClassifier {
    /// Load a classifier from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path, max_sequence_length: usize) -> Result<Self, InferenceError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(InferenceError::ModelLoad(format!(
                "model.onnx not found in {}",
                model_dir.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(InferenceError::ModelLoad(format!(
                "tokenizer.json not found in {}",
                model_dir.display()
            )));
        }

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| InferenceError::ModelLoad(format!("load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| InferenceError::ModelLoad(format!("set truncation: {e}")))?;
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        let session = Session::builder()
            .map_err(|e| InferenceError::ModelLoad(format!("session builder: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| InferenceError::ModelLoad(format!("load model: {e}")))?;

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();

        check_inputs(&input_names)?;

        let output = session
            .outputs()
            .first()
            .ok_or_else(|| InferenceError::ModelLoad("model declares no outputs".to_string()))?;
        let num_classes =
            reconcile_classes(num_labels_from_config(model_dir)?, infer_classes(output.dtype()))?;

        info!(
            num_classes,
            max_sequence_length,
            inputs = ?input_names,
            model = %model_path.display(),
            "loaded classification model"
        );
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            input_names,
            num_classes,
        })
    }
}

impl SequenceClassifier for OnnxClassifier {
    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn logits(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::InferenceFailed(format!("tokenize: {e}")))?;

        let seq_len = encoding.get_ids().len();
        let shape = [1i64, seq_len as i64];
        debug!(seq_len, "encoded input");

        let mut inputs: Vec<(Cow<'static, str>, SessionInputValue<'static>)> = Vec::new();
        for name in &self.input_names {
            // Names were checked against SUPPORTED_INPUTS at load.
            let source = match name.as_str() {
                "input_ids" => encoding.get_ids(),
                "attention_mask" => encoding.get_attention_mask(),
                _ => encoding.get_type_ids(),
            };
            let data: Vec<i64> = source.iter().map(|&v| v as i64).collect();
            let tensor = Tensor::from_array((shape, data.into_boxed_slice()))
                .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
            inputs.push((Cow::Owned(name.clone()), tensor.into()));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::InferenceFailed("model session poisoned".to_string()))?;
        let outputs = session
            .run(inputs)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        if outputs.len() == 0 {
            return Err(InferenceError::InferenceFailed(
                "model produced no outputs".to_string(),
            ));
        }

        // Logits: [1, num_classes].
        let (output_shape, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let dims: &[i64] = output_shape;
        if dims.len() != 2 || dims[0] != 1 || dims[1] as usize != self.num_classes {
            return Err(InferenceError::InferenceFailed(format!(
                "unexpected output shape: {dims:?}, expected [1, {}]",
                self.num_classes
            )));
        }

        Ok(output_data.to_vec())
    }
}

/// Model inputs the tokenizer encoding can supply
const SUPPORTED_INPUTS: [&str; 3] = ["input_ids", "attention_mask", "token_type_ids"];

/// Reject graphs that need an input the tokenizer cannot feed.
fn check_inputs(input_names: &[String]) -> Result<(), InferenceError> {
    if !input_names.iter().any(|name| name == "input_ids") {
        return Err(InferenceError::ModelLoad(
            "model does not declare an input_ids input".to_string(),
        ));
    }
    match input_names
        .iter()
        .find(|name| !SUPPORTED_INPUTS.contains(&name.as_str()))
    {
        Some(other) => Err(InferenceError::ModelLoad(format!(
            "unsupported model input: {other}"
        ))),
        None => Ok(()),
    }
}

/// Pick the class count from `config.json` and the output shape.
///
/// Either source alone is enough; when both are known they must agree.
fn reconcile_classes(
    from_config: Option<usize>,
    from_output: Option<usize>,
) -> Result<usize, InferenceError> {
    match (from_config, from_output) {
        (Some(config), Some(output)) if config != output => Err(InferenceError::ModelLoad(
            format!("config.json declares {config} classes but the model outputs {output}"),
        )),
        (Some(n), _) | (None, Some(n)) => Ok(n),
        (None, None) => Err(InferenceError::ModelLoad(
            "cannot determine class count: no config.json and dynamic output shape".to_string(),
        )),
    }
}

/// Read the class count from a Hugging Face `config.json`, if present.
fn num_labels_from_config(model_dir: &Path) -> Result<Option<usize>, InferenceError> {
    let path = model_dir.join("config.json");
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| InferenceError::ModelLoad(format!("read config.json: {e}")))?;
    let config: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| InferenceError::ModelLoad(format!("parse config.json: {e}")))?;

    if let Some(id2label) = config.get("id2label").and_then(|v| v.as_object()) {
        if !id2label.is_empty() {
            return Ok(Some(id2label.len()));
        }
    }
    Ok(config
        .get("num_labels")
        .and_then(|v| v.as_u64())
        .map(|n| n as usize))
}

/// Try to infer the class count from the ONNX model output type.
fn infer_classes(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
