//! Embed page for sharing stored images.

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use crate::routes::{request_base, request_hostname};
use crate::state::AppState;

/// Create the embed page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/i/{name}", get(embed_page))
}

/// Render the HTML wrapper page for a stored image.
///
/// GET /i/{name}
async fn embed_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let exists = match state.storage().exists(&name).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!(name = %name, error = %e, "failed to check stored file");
            false
        }
    };

    if !exists {
        return (StatusCode::NOT_FOUND, "nope!").into_response();
    }

    let (scheme, host) = request_base(&headers);

    let mut context = tera::Context::new();
    context.insert("name", &name);
    context.insert("hostname", &request_hostname(&headers));
    context.insert("img_url", &format!("{scheme}://{host}/uploads/{name}"));
    context.insert("this_url", &format!("{scheme}://{host}/i/{name}"));

    match state.templates().render("image.html", &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(name = %name, error = %e, "failed to render embed page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
