use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::analyzers::{file, message, password, privacy, url};
use crate::config::Config;
use crate::scan_log::{ScanLog, ScanStats};

#[derive(Clone)]
pub struct AppState {
    pub scan_log: ScanLog,
}

/// Request body for `POST /api/scan/{type}`. Every field is optional; the
/// dispatcher forwards whatever the selected analyzer needs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRequest {
    pub url: Option<String>,
    pub message: Option<String>,
    pub simple_mode: Option<bool>,
    pub password: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<f64>,
    pub file_type: Option<String>,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn invalid_type() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid type".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn scan(
    State(state): State<AppState>,
    Path(scan_type): Path<String>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = match scan_type.as_str() {
        "url" => to_value(url::analyze_url(body.url.as_deref().unwrap_or(""))),
        "message" => to_value(message::analyze_message(
            body.message.as_deref().unwrap_or(""),
            body.simple_mode.unwrap_or(false),
        )),
        "password" => match password::analyze_password(body.password.as_deref().unwrap_or("")) {
            Some(verdict) => to_value(verdict),
            None => return Err(ApiError::invalid_type()),
        },
        "file" => to_value(file::analyze_file(
            body.file_name.as_deref().unwrap_or(""),
            body.file_size.unwrap_or(0.0),
            body.file_type.as_deref(),
        )),
        "privacy" => to_value(privacy::analyze_privacy(body.url.as_deref().unwrap_or(""))),
        _ => return Err(ApiError::invalid_type()),
    };

    // Message and password bodies are never logged.
    let input = body
        .url
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| body.file_name.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or("***");
    state.scan_log.record(&scan_type, input, result.clone());
    log::debug!("Scan completed: type={scan_type} input={input}");

    Ok(Json(result))
}

async fn analytics(State(state): State<AppState>) -> Json<ScanStats> {
    Json(state.scan_log.stats().await)
}

fn to_value<T: serde::Serialize>(verdict: T) -> serde_json::Value {
    serde_json::to_value(verdict).unwrap_or(serde_json::Value::Null)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scan/:scan_type", post(scan))
        .route("/api/analytics", get(analytics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let scan_log = if config.scan_log.enabled {
        log::info!("Scan history: {}", config.scan_log.path);
        ScanLog::new(
            config.scan_log.path.clone(),
            config.scan_log.flush_interval_seconds,
        )?
    } else {
        log::info!("Scan history disabled");
        ScanLog::disabled()
    };

    let state = AppState { scan_log };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    log::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
