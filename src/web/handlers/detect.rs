use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::detect::types::{Classification, RawDetectionRequest};
use crate::detect::DetectError;
use crate::storage::detection_log::DetectionLog;
use crate::AppContext;

/// Every rejection, whatever the internal cause, gets this message so the
/// endpoint cannot be used as a discovery oracle.
const PUBLIC_ERROR_MESSAGE: &str = "Invalid API key or malformed request";

const LOG_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectSuccess {
    pub status: &'static str,
    pub language: String,
    pub classification: Classification,
    pub confidence_score: f64,
    pub explanation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DetectFailure {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn detect(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match run_pipeline(&ctx, &headers, &body).await {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(e) => reject(e),
    }
}

/// Preflight and bare OPTIONS probes get an empty 200; the CORS layer
/// attaches the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Response {
    reject(DetectError::MethodNotAllowed)
}

async fn run_pipeline(
    ctx: &AppContext,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<DetectSuccess, DetectError> {
    let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    let api_key_id = ctx.auth.verify_api_key(api_key).await?;

    let raw: RawDetectionRequest =
        serde_json::from_slice(body).map_err(|_| DetectError::MalformedBody)?;
    let req = raw.validate()?;

    let outcome = ctx.detector.detect(&req)?;
    info!(
        "Detection for language '{}': {} ({:.2})",
        req.language.as_str(),
        outcome.classification.as_str(),
        outcome.confidence
    );

    // advisory write, never blocks or fails the response
    let log = DetectionLog::new(
        api_key_id,
        req.language.as_str(),
        outcome.classification,
        outcome.confidence,
    );
    let logs = ctx.logs.clone();
    tokio::spawn(async move {
        match timeout(LOG_TIMEOUT, logs.append(&log)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to append detection log: {}", e),
            Err(_) => warn!("Detection log append timed out"),
        }
    });

    Ok(DetectSuccess {
        status: "success",
        language: req.language_raw,
        classification: outcome.classification,
        confidence_score: outcome.confidence,
        explanation: outcome.explanation,
    })
}

fn reject(err: DetectError) -> Response {
    let status = match &err {
        DetectError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DetectError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        DetectError::MalformedBody
        | DetectError::MissingField(_)
        | DetectError::UnsupportedLanguage(_)
        | DetectError::UnsupportedFormat(_)
        | DetectError::InvalidAudio(_) => StatusCode::BAD_REQUEST,
    };

    debug!("Rejecting detection request: {}", err);

    let body = DetectFailure {
        status: "error",
        message: PUBLIC_ERROR_MESSAGE,
    };
    (status, Json(body)).into_response()
}
