//! Raw stored file serving.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the file serving router.
pub fn router() -> Router<AppState> {
    Router::new().route("/uploads/{name}", get(serve_upload))
}

/// Serve a stored image.
///
/// GET /uploads/{name}
async fn serve_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    // Storage rejects traversal too, but don't even look up names that
    // could never have been generated.
    if name.contains("..") || name.contains('/') || name.contains('\0') {
        return Err(AppError::NotFound);
    }

    let content = state.storage().read(&name).await?.ok_or(AppError::NotFound)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime_from_name(&name)),
            // Stored files are immutable; names are never reused.
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        content,
    )
        .into_response())
}

fn mime_from_name(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
