//! Image upload route handler.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::warn;

use crate::audit::AuditLevel;
use crate::error::AppError;
use crate::image::{random_filename, sniff_extension};
use crate::routes::request_base;
use crate::state::AppState;

/// Create the upload router. The API key middleware is layered on in
/// [`crate::app`].
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload_image))
}

/// Successful upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}

/// Upload an image.
///
/// POST /
/// Content-Type: multipart/form-data, field `file`
///
/// Validates the upload (presence, filename, claimed extension, sniffed
/// content type), stores it under a fresh random name, and returns the
/// shareable link.
async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    // Pull the `file` field out of the multipart form.
    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        filename = field.file_name().map(|s| s.to_string());
        match field.bytes().await {
            Ok(bytes) => data = Some(bytes.to_vec()),
            Err(e) => {
                warn!(error = %e, "failed to read upload data");
                return Err(reject(&state, "Failed to read file data", "Upload body could not be read").await);
            }
        }
        // Only the first `file` field counts.
        break;
    }

    let (Some(filename), Some(data)) = (filename, data) else {
        return Err(reject(
            &state,
            "You didn't upload a file",
            "File not included with POST request",
        )
        .await);
    };

    if filename.is_empty() {
        return Err(reject(&state, "Blank filename", "Filename blank in POST request").await);
    }

    let Some(extension) = claimed_extension(&filename) else {
        return Err(reject(
            &state,
            "That type of file isn't supported.",
            "Unsupported file type in POST request",
        )
        .await);
    };
    if !state.config().is_allowed_extension(&extension) {
        return Err(reject(
            &state,
            "That type of file isn't supported.",
            "Unsupported file type in POST request",
        )
        .await);
    }

    // The extension gate above is spoofable; verify the actual bytes.
    if sniff_extension(&data) != Some(extension.as_str()) {
        return Err(reject(
            &state,
            "Sorry, this file looks sketchy.",
            "File did not appear to be an image, despite filename",
        )
        .await);
    }

    let stored_name = random_filename(&extension);

    state.storage().write(&stored_name, &data).await?;

    let (scheme, host) = request_base(&headers);
    let url = format!("{scheme}://{host}/i/{stored_name}");

    Ok(Json(UploadResponse { success: true, url }).into_response())
}

/// Audit a rejected upload as a warning; the client message is returned
/// verbatim in the 400 body.
async fn reject(state: &AppState, client_message: &str, audit_message: &str) -> AppError {
    state
        .audit()
        .report(AuditLevel::Warning, audit_message)
        .await;
    AppError::BadRequest(client_message.to_string())
}

/// The lowercased extension of a claimed filename, including its dot.
fn claimed_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}
