//! # REST API
//!
//! Builds the axum router that exposes the payload service over HTTP.
//! All endpoints share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                 | Description                              |
//! |--------|----------------------|------------------------------------------|
//! | GET    | `/health`            | Liveness probe                           |
//! | GET    | `/status`            | Version, uptime and counters             |
//! | POST   | `/pix/payload`       | Validate and encode a payment request    |
//! | POST   | `/pix/decode`        | Decode a payload and verify its checksum |
//! | POST   | `/pix/keys/validate` | Check a recipient key for a category     |

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pix_protocol::amount::Amount;
use pix_protocol::emv::EmvError;
use pix_protocol::key::{digits_only, ensure_digit_encodable, validate_key, PixKeyType};
use pix_protocol::payload::{
    decode_payload, encode, split_checksum, AmountPolicy, DecodedPayload, PaymentTarget,
};
use pix_protocol::share::{share_message, whatsapp_url};
use pix_protocol::PixError;

use crate::metrics::SharedMetrics;
use crate::qr;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The service's reported version string.
    pub version: String,
    /// When the service started.
    pub started_at: DateTime<Utc>,
    /// Minimum size, in pixels, of SVG QR codes.
    pub qr_size: u32,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error returned by API handlers. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was understood but its content is not acceptable.
    #[error("{0}")]
    Unprocessable(String),
    /// The submitted payload is malformed or fails verification.
    #[error("{0}")]
    BadRequest(String),
    /// Something failed on our side.
    #[error("{0}")]
    Internal(String),
}

impl From<PixError> for ApiError {
    fn from(err: PixError) -> Self {
        ApiError::Unprocessable(err.to_string())
    }
}

impl From<EmvError> for ApiError {
    fn from(err: EmvError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Error body shared by all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/pix/payload", post(payload_handler))
        .route("/pix/decode", post(decode_handler))
        .route("/pix/keys/validate", post(validate_key_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Response body for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    pub protocol_version: String,
    pub uptime_seconds: i64,
    pub payloads_generated: u64,
    pub payloads_decoded: u64,
    pub timestamp: String,
}

/// Request body for `POST /pix/payload`.
#[derive(Debug, Deserialize)]
pub struct PayloadRequest {
    #[serde(default)]
    pub key_type: PixKeyType,
    pub key: String,
    pub beneficiary_name: String,
    pub city: String,
    /// Amount in reais. Missing or zero means open amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Refuse requests without a positive amount.
    #[serde(default)]
    pub require_amount: bool,
    /// Render an SVG QR code into the response.
    #[serde(default)]
    pub include_qr: bool,
}

/// Response body for `POST /pix/payload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PayloadResponse {
    pub payload: String,
    pub checksum: String,
    /// Amount as written in the payload, e.g. `10.50`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_svg: Option<String>,
    pub share_url: String,
}

/// Request body for `POST /pix/decode`.
#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub payload: String,
}

/// Request body for `POST /pix/keys/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateKeyRequest {
    /// Category name. Aliases such as `telefone` are accepted.
    pub key_type: String,
    pub key: String,
}

/// Response body for `POST /pix/keys/validate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
    pub key_type: String,
    /// The key's digits, as they would appear in a payload.
    pub encoded_key: String,
    /// Whether a payload can carry this key without losing characters.
    pub encodable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` returns 200 while the process is up.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status` reports version, uptime and payload counters.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();
    let resp = StatusResponse {
        version: state.version.clone(),
        protocol_version: pix_protocol::config::PROTOCOL_VERSION.to_string(),
        uptime_seconds: (now - state.started_at).num_seconds(),
        payloads_generated: state.metrics.payloads_generated_total.get(),
        payloads_decoded: state.metrics.payloads_decoded_total.get(),
        timestamp: now.to_rfc3339(),
    };
    Json(resp)
}

/// Turn a payload request into a target and its amount policy.
///
/// A missing or zero amount means open amount. A negative or unrepresentable
/// amount is refused rather than dropped.
fn payment_target(req: PayloadRequest) -> Result<(PaymentTarget, AmountPolicy), PixError> {
    let amount = req.amount.map(Amount::from_reais).transpose()?.flatten();
    let target = PaymentTarget::new(req.key, req.key_type, req.beneficiary_name, req.city)
        .with_amount(amount);
    let policy = if req.require_amount {
        AmountPolicy::Required
    } else {
        AmountPolicy::Open
    };
    Ok((target, policy))
}

/// `POST /pix/payload` validates a payment request and encodes it.
async fn payload_handler(
    State(state): State<AppState>,
    Json(req): Json<PayloadRequest>,
) -> Result<Json<PayloadResponse>, ApiError> {
    let started = Instant::now();
    let include_qr = req.include_qr;
    let key_type = req.key_type;

    let built = payment_target(req)
        .and_then(|(target, policy)| encode(&target, policy).map(|payload| (target, payload)));
    let (target, payload) = match built {
        Ok(built) => built,
        Err(e) => {
            state.metrics.validation_failures_total.inc();
            tracing::warn!(error = %e, key_type = %key_type, "payment request rejected");
            return Err(e.into());
        }
    };
    state
        .metrics
        .encode_latency_seconds
        .observe(started.elapsed().as_secs_f64());
    state.metrics.payloads_generated_total.inc();

    let checksum = split_checksum(&payload)
        .map(|(_, crc)| crc.to_string())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let qr_svg = if include_qr {
        let svg = qr::render_svg(&payload, state.qr_size).map_err(|e| {
            tracing::error!(error = %e, "QR rendering failed");
            ApiError::Internal(format!("QR rendering failed: {e}"))
        })?;
        state.metrics.qr_renders_total.inc();
        Some(svg)
    } else {
        None
    };

    let amount = target.encoded_amount();
    let message = share_message(&target.beneficiary_name, amount, &payload);

    Ok(Json(PayloadResponse {
        checksum,
        amount: amount.map(|a| a.to_emv_string()),
        qr_svg,
        share_url: whatsapp_url(&message),
        payload,
    }))
}

/// `POST /pix/decode` decodes a payload after verifying its checksum.
async fn decode_handler(
    State(state): State<AppState>,
    Json(req): Json<DecodeRequest>,
) -> Result<Json<DecodedPayload>, ApiError> {
    match decode_payload(&req.payload) {
        Ok(decoded) => {
            state.metrics.payloads_decoded_total.inc();
            Ok(Json(decoded))
        }
        Err(e) => {
            state.metrics.decode_failures_total.inc();
            tracing::warn!(error = %e, "payload rejected");
            Err(e.into())
        }
    }
}

/// `POST /pix/keys/validate` checks a key against its category.
///
/// An unknown category is a 422. A key that fails its category's rules is
/// a normal 200 response with `valid: false`.
async fn validate_key_handler(
    Json(req): Json<ValidateKeyRequest>,
) -> Result<Json<ValidateKeyResponse>, ApiError> {
    let kind: PixKeyType = req
        .key_type
        .parse()
        .map_err(|e: pix_protocol::key::KeyError| ApiError::Unprocessable(e.to_string()))?;

    let result = validate_key(&req.key, kind);
    Ok(Json(ValidateKeyResponse {
        valid: result.is_ok(),
        key_type: kind.as_str().to_string(),
        encoded_key: digits_only(&req.key),
        encodable: result.is_ok() && ensure_digit_encodable(&req.key, kind).is_ok(),
        error: result.err().map(|e| e.to_string()),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
