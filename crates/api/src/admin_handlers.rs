use axum::{extract::State, http::StatusCode, response::Html};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// GET /admin/metrics — fileserver hit count as a small HTML page.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Html<String> {
    let hits = state.fileserver_hits.load(Ordering::Relaxed);

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpr Admin</h1>\n    \
         <p>Chirpr has been visited {hits} times!</p>\n  </body>\n</html>"
    ))
}

/// POST /admin/reset — dev-only: zero the hit counter and drop every user
/// (chirps and refresh tokens cascade).
pub async fn reset(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    if state.platform != "dev" {
        return Err(ApiError::Forbidden);
    }

    state.fileserver_hits.store(0, Ordering::Relaxed);
    let removed = state.users.delete_all().await?;

    tracing::info!(removed, "admin reset: users cleared, hit counter zeroed");

    Ok(StatusCode::OK)
}
