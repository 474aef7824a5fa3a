use axum::{Router, routing::post};

use crate::handlers::{self, AppState};

pub fn projection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projections", post(handlers::run_projection))
        .route(
            "/api/projections/sensitivity",
            post(handlers::run_sensitivity),
        )
}
