//! API key authentication middleware.
//!
//! Guards the upload endpoint behind a shared-secret `X-Api-Key` header.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::audit::AuditLevel;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the upload API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that requires a valid `X-Api-Key` header.
///
/// Missing or mismatching keys get a 401 JSON error and an informational
/// audit event. Comparison is constant-time.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let valid = provided.is_some_and(|key| {
        key.as_bytes()
            .ct_eq(state.config().api_key.as_bytes())
            .into()
    });

    if valid {
        next.run(request).await
    } else {
        state
            .audit()
            .report(AuditLevel::Info, "No API key supplied")
            .await;
        AppError::Unauthorized.into_response()
    }
}
