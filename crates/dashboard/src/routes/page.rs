//! Dashboard Page Routes

use axum::{extract::State, http::StatusCode, response::Html, Form};
use sentiment_engine::{validate_input, InferenceError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use askama::Template;

use crate::render::{Notice, PageTemplate};
use crate::{AppContext, DashboardError};

/// Submitted form body
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

/// Render the empty dashboard
pub async fn index(State(ctx): State<Arc<AppContext>>) -> Result<Html<String>, DashboardError> {
    let page = PageTemplate::new(&ctx.branding, ctx.logo.as_deref());
    Ok(Html(page.render()?))
}

/// Classify the submitted text and re-render the page
pub async fn analyze(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<AnalyzeForm>,
) -> Result<(StatusCode, Html<String>), DashboardError> {
    let page = PageTemplate::new(&ctx.branding, ctx.logo.as_deref()).with_text(&form.text);

    if validate_input(&form.text).is_err() {
        warn!("Rejected blank submission");
        let page = page.with_notice(Notice::warning("Please enter text."));
        return Ok((StatusCode::OK, Html(page.render()?)));
    }

    let worker = ctx.clone();
    let text = form.text.clone();
    let outcome = tokio::task::spawn_blocking(move || worker.engine.analyze(&text))
        .await
        .unwrap_or_else(|e| Err(InferenceError::InferenceFailed(e.to_string())));

    match outcome {
        Ok(result) => {
            info!(
                label = result.label.name,
                confidence = result.confidence,
                "prediction served"
            );
            let page = page.with_result(&result);
            Ok((StatusCode::OK, Html(page.render()?)))
        }
        Err(e) => {
            error!("Inference failed: {}", e);
            let page = page.with_notice(Notice::error(format!(
                "{} could not read that one. Inference failed.",
                ctx.branding.ai_name
            )));
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(page.render()?)))
        }
    }
}
