use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseCheck,
    pool: PoolStats,
}

#[derive(Serialize)]
pub struct DatabaseCheck {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
    max: u32,
}

/// GET /health
///
/// 200 when Postgres answers `SELECT 1` in time, 503 otherwise. The registry
/// is not checked.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let pool = &state.deps.db_pool;

    let database = match tokio::time::timeout(DB_CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(Ok(_)) => DatabaseCheck { ok: true, error: None },
        Ok(Err(e)) => DatabaseCheck {
            ok: false,
            error: Some(e.to_string()),
        },
        Err(_) => DatabaseCheck {
            ok: false,
            error: Some(format!("no answer within {}s", DB_CHECK_TIMEOUT.as_secs())),
        },
    };

    let (code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(error = ?database.error, "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status,
        database,
        pool: PoolStats {
            size: pool.size(),
            idle: pool.num_idle(),
            max: pool.options().get_max_connections(),
        },
    };
    (code, Json(response))
}
