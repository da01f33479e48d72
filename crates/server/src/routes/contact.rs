use axum::{extract::{rejection::JsonRejection, State}, Json};
use common::types::StatusOk;
use models::ContactMessage;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Accept a contact message. Malformed bodies are rejected by the extractor
/// and invalid fields by the service (both 422); a valid message always gets
/// `{"status": "ok"}`, stored or not.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<StatusOk>, JsonApiError> {
    let Json(message) = payload?;
    // the receipt is only logged; the caller never sees it
    state.contact.submit(message).await?;
    Ok(Json(StatusOk::ok()))
}
