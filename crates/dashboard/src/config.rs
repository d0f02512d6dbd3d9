//! Dashboard configuration

use std::path::PathBuf;

use sentiment_engine::{LabelCardinality, DEFAULT_MAX_SEQUENCE_LENGTH};
use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Institutional copy shown around the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub ai_name: String,
    pub university: String,
    pub class_name: String,
    pub lecturer: String,
    pub academic_year: String,
    pub author: String,
    pub system_version: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            ai_name: "Miluna".to_string(),
            university: "UNIVERSITAS MERCU BUANA".to_string(),
            class_name: "DATA SCIENCE".to_string(),
            lecturer: "Lecturer: Ilham Nugraha, S.Kom, M.Sc".to_string(),
            academic_year: "2025-2026".to_string(),
            author: "Ali Khllo".to_string(),
            system_version: "Miluna-DASHBOARD-2026".to_string(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,

    /// Directory holding `model.onnx` and `tokenizer.json`
    pub model_dir: PathBuf,

    /// Tokenizer truncation length
    pub max_sequence_length: usize,

    /// Two-class or three-class label table
    pub label_cardinality: LabelCardinality,

    /// Logo embedded in the branding panel (optional on disk)
    pub logo_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,

    pub branding: Branding,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            model_dir: PathBuf::from("model"),
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            label_cardinality: LabelCardinality::Ternary,
            logo_path: PathBuf::from("logo.png"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            branding: Branding::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from `Dashboard.toml` (if present) and `DASHBOARD__*` env overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("Dashboard")
    }

    /// Load with an explicit file stem or path; the file is optional.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }
}
