use std::time::Duration;

use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;

use crate::constants::START_TIME;

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    version: String,
}

/// Liveness probe. This service holds no storage, so there is nothing
/// deeper to probe than the process itself.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    let now = Utc::now();
    let uptime_secs = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "Ok".to_string(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
