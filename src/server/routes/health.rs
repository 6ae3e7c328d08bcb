//! Health check endpoint

use crate::server::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// Health check endpoint handler
///
/// Reports the service status together with the number of items currently
/// in the store.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.items.count().await {
        Ok(count) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "items": count,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            warn!("Health check could not reach the item store: {}", e);
            HttpResponse::Ok().json(json!({
                "status": "degraded",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION")
            }))
        }
    }
}
