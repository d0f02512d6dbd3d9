//! Sentiment Dashboard Server
//!
//! Single-page web dashboard: a text box, a button, and the predicted
//! sentiment label with its confidence.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sentiment_engine::{InferenceError, LabelTable, OnnxClassifier, SentimentEngine};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod logo;
pub mod render;
mod routes;

pub use crate::config::{Branding, DashboardConfig, LogFormat};

/// Dashboard errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error(transparent)]
    Engine(#[from] InferenceError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Everything a request handler needs, built once at startup
pub struct AppContext {
    /// Loaded model and label table
    pub engine: SentimentEngine,
    /// Institutional copy
    pub branding: Branding,
    /// Logo as a `data:` URI, if it could be read
    pub logo: Option<String>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppContext {
    /// Assemble a context from already-built parts
    pub fn new(engine: SentimentEngine, branding: Branding, logo: Option<String>) -> Self {
        Self {
            engine,
            branding,
            logo,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Load the model and logo described by `config`.
    ///
    /// A model that cannot be loaded is fatal; a missing logo is not.
    pub fn load(config: &DashboardConfig) -> Result<Self, DashboardError> {
        info!("Loading model from {}", config.model_dir.display());
        let classifier = OnnxClassifier::load(&config.model_dir, config.max_sequence_length)?;
        let engine = SentimentEngine::new(
            Box::new(classifier),
            LabelTable::new(config.label_cardinality),
        )?;
        let logo = logo::load_logo(&config.logo_path);

        Ok(Self::new(engine, config.branding.clone(), logo))
    }
}

/// Create the application router
pub fn create_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/analyze", post(routes::page::analyze))
        .route("/api/v1/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Initialize logging
pub fn init_logging(config: &DashboardConfig) -> Result<(), DashboardError> {
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = match config.log_format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
    installed.map_err(|e| DashboardError::Io(std::io::Error::other(e)))
}

/// Run the server until Ctrl-C
pub async fn run_server(addr: &str, ctx: Arc<AppContext>) -> Result<(), DashboardError> {
    let app = create_router(ctx);

    info!("Starting dashboard on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use sentiment_engine::SequenceClassifier;
    use tower::ServiceExt;

    /// Scores happy/hopeless keywords like a confidently trained binary model
    struct KeywordClassifier;

    impl SequenceClassifier for KeywordClassifier {
        fn num_classes(&self) -> usize {
            2
        }

        fn logits(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
            let lower = text.to_lowercase();
            if lower.contains("explode") {
                return Err(InferenceError::InferenceFailed("bad tensor".to_string()));
            }
            let score = if lower.contains("happy") {
                3.0
            } else if lower.contains("hopeless") {
                -3.0
            } else {
                0.5
            };
            Ok(vec![-score, score])
        }
    }

    fn app(logo: Option<&str>) -> Router {
        let engine =
            SentimentEngine::new(Box::new(KeywordClassifier), LabelTable::ternary()).unwrap();
        let ctx = AppContext::new(engine, Branding::default(), logo.map(str::to_string));
        create_router(Arc::new(ctx))
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn submit(text: &str) -> Request<Body> {
        let form = serde_urlencoded::to_string([("text", text)]).unwrap();
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_renders() {
        let response = app(None)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Let Miluna Guess"));
        assert!(html.contains("UNIVERSITAS MERCU BUANA"));
    }

    #[tokio::test]
    async fn test_logo_embedded() {
        let response = app(Some("data:image/png;base64,aGVsbG8="))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("data:image/png;base64,aGVsbG8="));
    }

    #[tokio::test]
    async fn test_blank_submission_warns() {
        let response = app(None).oneshot(submit("   ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Please enter text."));
        assert!(!html.contains("CONFIDENCE:"));
    }

    #[tokio::test]
    async fn test_happy_submission_positive() {
        let response = app(None)
            .oneshot(submit("I am so happy today"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("POSITIVE"));
        assert!(html.contains("🌕"));
        assert!(html.contains("CONFIDENCE: 99.75%"));
        assert!(html.contains("I am so happy today</textarea>"));
    }

    #[tokio::test]
    async fn test_hopeless_submission_negative() {
        let response = app(None)
            .oneshot(submit("Everything feels hopeless"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("NEGATIVE"));
        assert!(html.contains("🌑"));
    }

    #[tokio::test]
    async fn test_submitted_text_escaped() {
        let response = app(None)
            .oneshot(submit("<b>happy</b>"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("&lt;b&gt;happy&lt;"));
        assert!(!html.contains("<b>happy</b>"));
    }

    #[tokio::test]
    async fn test_inference_failure_keeps_serving() {
        let app = app(None);
        let response = app.clone().oneshot(submit("explode please")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Inference failed."));

        let response = app.oneshot(submit("happy again")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model"]["classes"], 2);
        assert_eq!(json["model"]["label_cardinality"], "ternary");
        assert_eq!(json["model"]["labels"][2], "POSITIVE");
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let config = DashboardConfig {
            model_dir: "/nonexistent/model".into(),
            ..Default::default()
        };
        let err = AppContext::load(&config).err().unwrap();
        assert!(matches!(
            err,
            DashboardError::Engine(InferenceError::ModelLoad(_))
        ));
    }
}
