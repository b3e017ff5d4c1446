use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::{validate_contact, FieldViolation};

pub const CONTACT_SUCCESS_MESSAGE: &str = "Your message has been sent successfully!";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

/// `POST /api/contact`: validate, then store. Nothing is stored unless every field passes.
pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected contact body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::Validation(vec![FieldViolation::new(
            "body",
            "Request body must be a JSON object",
        )])
    })?;

    let data = validate_contact(&body).map_err(|violations| {
        info!(violations = violations.len(), "Contact submission failed validation");
        AppError::Validation(violations)
    })?;

    let message = state.store.create(data).await?;
    info!(id = message.id, "Contact message received");

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_SUCCESS_MESSAGE,
        id: message.id,
    }))
}
