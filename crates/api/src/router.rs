use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::{
    AppState, admin_handlers, auth_handlers, chirp_handlers, middleware as auth_middleware,
    webhook_handlers,
};

pub fn router(state: Arc<AppState>, assets_dir: &str) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/healthz", get(|| async { "OK" }))
        .route("/api/users", post(auth_handlers::create_user))
        .route("/api/login", post(auth_handlers::login))
        .route("/api/refresh", post(auth_handlers::refresh))
        .route("/api/revoke", post(auth_handlers::revoke))
        .route("/api/polka/webhooks", post(webhook_handlers::polka_webhook))
        .route("/api/chirps", get(chirp_handlers::get_chirps))
        .route("/api/chirps/{chirp_id}", get(chirp_handlers::get_chirp));

    // Mutating routes: token validated before any handler (and therefore
    // before any resource lookup)
    let protected_routes = Router::new()
        .route("/api/chirps", post(chirp_handlers::create_chirp))
        .route("/api/chirps/{chirp_id}", delete(chirp_handlers::delete_chirp))
        .route("/api/users", put(auth_handlers::update_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(admin_handlers::metrics))
        .route("/admin/reset", post(admin_handlers::reset));

    // Static assets under /app, every hit counted
    let fileserver = Router::new()
        .nest_service("/app", ServeDir::new(assets_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::track_fileserver_hit,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(fileserver)
        .with_state(state)
}
