use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use doctor_cell::router::doctor_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1/doctors", doctor_routes(state))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "doctor-service"
    }))
}
