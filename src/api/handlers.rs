// Request handlers for API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::responses::{ApiError, HealthResponse, PrettyJson};
use crate::api::AppState;
use crate::core::models::{ProgressionResult, Rounding};
use crate::engine::available_time_zones;

/// Query string accepted by the progression endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ProgressionParams {
    pub timezone: Option<String>,
    pub rounding: Option<String>,
}

/// Progression for an explicit format
///
/// GET /api/:format?timezone=<zone>&rounding=<round|ceil|floor>
pub async fn progression_handler(
    State(app_state): State<AppState>,
    Path(format): Path<String>,
    Query(params): Query<ProgressionParams>,
    headers: HeaderMap,
) -> Result<PrettyJson<ProgressionResult>, ApiError> {
    run_query(&app_state, &format, params, &headers)
}

/// Progression using the configured default format
///
/// GET /api?timezone=<zone>&rounding=<round|ceil|floor>
pub async fn default_progression_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ProgressionParams>,
    headers: HeaderMap,
) -> Result<PrettyJson<ProgressionResult>, ApiError> {
    let format = app_state.config.default_format.as_str();
    run_query(&app_state, format, params, &headers)
}

fn run_query(
    app_state: &AppState,
    format: &str,
    params: ProgressionParams,
    headers: &HeaderMap,
) -> Result<PrettyJson<ProgressionResult>, ApiError> {
    let request_id = request_id(headers);

    // An empty timezone parameter counts as absent
    let timezone = params
        .timezone
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| app_state.config.default_timezone.clone());

    let rounding = params
        .rounding
        .filter(|r| !r.is_empty())
        .map(|r| r.parse::<Rounding>())
        .transpose()
        .map_err(|e| {
            warn!(error = %e, request_id = ?request_id, "Rejected progression query");
            ApiError::new(StatusCode::BAD_REQUEST, "invalid rounding".to_string())
                .with_request_id(request_id.clone())
        })?;

    let mut result = app_state.service.query(format, &timezone).map_err(|e| {
        warn!(
            error = %e,
            format = %format,
            timezone = %timezone,
            request_id = ?request_id,
            "Rejected progression query"
        );
        ApiError::from_progression_error(e).with_request_id(request_id.clone())
    })?;

    if let Some(rounding) = rounding {
        result.result = result.result.rounded(rounding);
    }

    debug!(format = %format, timezone = %timezone, "Progression query served");
    Ok(PrettyJson(result))
}

/// List the time zone identifiers accepted by the progression endpoints
///
/// GET /timezones
pub async fn timezones_handler() -> Json<Vec<&'static str>> {
    Json(available_time_zones())
}

/// Health check handler
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
