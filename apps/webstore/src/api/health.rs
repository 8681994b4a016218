//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![
        (
            "catalog",
            Box::pin(async {
                state
                    .products
                    .catalog_size()
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "uploads",
            Box::pin(async {
                let root = state.attachments.root();
                match tokio::fs::metadata(root).await {
                    Ok(meta) if meta.is_dir() => Ok(()),
                    Ok(_) => Err(format!("{} is not a directory", root.display())),
                    Err(e) => Err(format!("{}: {}", root.display(), e)),
                }
            }),
        ),
    ];

    run_health_checks(checks).await
}

/// Router serving `/ready`
pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
