//! Inline logo embedding

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{info, warn};

/// Read an image and encode it as a `data:` URI.
///
/// A missing or unreadable file is not fatal: the branding panel falls back
/// to plain text.
pub fn load_logo(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => {
            info!("Embedding logo from {} ({} bytes)", path.display(), bytes.len());
            Some(format!(
                "data:{};base64,{}",
                mime_for(path),
                STANDARD.encode(bytes)
            ))
        }
        Err(e) => {
            warn!("Logo unavailable at {}: {}", path.display(), e);
            None
        }
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
