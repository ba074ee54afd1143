//! POST /api/v1/payments and GET /api/v1/payments/{payment_id}

use crate::error::{AppError, AppResult};
use crate::payments::types::{PaymentRequest, PaymentResponse};
use crate::payments::validation::PaymentValidator;
use crate::services::payment_orchestrator::PaymentOrchestrator;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsState {
    pub orchestrator: Arc<PaymentOrchestrator>,
    pub validator: Arc<PaymentValidator>,
}

pub fn router(state: PaymentsState) -> Router {
    Router::new()
        .route("/api/v1/payments", post(create_payment))
        .route("/api/v1/payments/{payment_id}", get(get_payment))
        .with_state(state)
}

/// POST /api/v1/payments
pub async fn create_payment(
    State(state): State<PaymentsState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<PaymentResponse>)> {
    let payment = decode_payment_request(&body)?;
    debug!(currency = %payment.currency, "received a payment request");

    state.validator.validate(&payment)?;
    let response = state.orchestrator.process_payment(payment).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/payments/{payment_id}
pub async fn get_payment(
    State(state): State<PaymentsState>,
    Path(payment_id): Path<String>,
) -> AppResult<Json<PaymentResponse>> {
    let payment_id = Uuid::parse_str(&payment_id)
        .map_err(|_| AppError::malformed("payment_id: Input should be a valid UUID"))?;
    debug!(payment_id = %payment_id, "retrieve a payment");

    let payment = state.orchestrator.get_payment(payment_id).await?;
    Ok(Json(payment))
}

/// Decodes the request body, reporting every bad field rather than only
/// the first one.
pub fn decode_payment_request(body: &[u8]) -> AppResult<PaymentRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::malformed("body: Field required"));
    }

    let value: JsonValue = serde_json::from_slice(body)
        .map_err(|_| AppError::malformed("body: JSON decode error"))?;
    let object = match value {
        JsonValue::Object(object) => object,
        JsonValue::Null => return Err(AppError::malformed("body: Field required")),
        _ => {
            return Err(AppError::malformed(
                "body: Input should be a valid dictionary",
            ))
        }
    };

    let mut errors = Vec::new();
    let card_number = string_field(&object, "card_number", &mut errors);
    let expiry_month = string_field(&object, "expiry_month", &mut errors);
    let expiry_year = string_field(&object, "expiry_year", &mut errors);
    let currency = string_field(&object, "currency", &mut errors);
    let amount = integer_field(&object, "amount", &mut errors);
    let cvv = string_field(&object, "cvv", &mut errors);

    match (card_number, expiry_month, expiry_year, currency, amount, cvv) {
        (
            Some(card_number),
            Some(expiry_month),
            Some(expiry_year),
            Some(currency),
            Some(amount),
            Some(cvv),
        ) => Ok(PaymentRequest {
            card_number,
            expiry_month,
            expiry_year,
            currency,
            amount,
            cvv,
        }),
        _ => Err(AppError::malformed(errors.join("; "))),
    }
}

fn string_field(
    object: &Map<String, JsonValue>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match object.get(field) {
        Some(JsonValue::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(format!("{}: Input should be a valid string", field));
            None
        }
        None => {
            errors.push(format!("{}: Field required", field));
            None
        }
    }
}

fn integer_field(
    object: &Map<String, JsonValue>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let reason = match object.get(field) {
        None => "Field required",
        Some(JsonValue::Number(number)) => match (number.as_i64(), number.as_f64()) {
            (Some(value), _) => return Some(value),
            (None, Some(f)) if f.fract() != 0.0 => {
                "Input should be a valid integer, got a number with a fractional part"
            }
            // Whole floats such as 100.0 are accepted when they fit in an i64.
            (None, Some(f)) if f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                return Some(f as i64)
            }
            _ => "Input should be a valid integer",
        },
        Some(JsonValue::String(raw)) => match raw.trim().parse::<i64>() {
            Ok(value) => return Some(value),
            Err(_) => "Input should be a valid integer, unable to parse string as an integer",
        },
        Some(_) => "Input should be a valid integer",
    };

    errors.push(format!("{}: {}", field, reason));
    None
}
