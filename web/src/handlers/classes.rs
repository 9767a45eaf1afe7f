//! Class registration endpoint.

use super::{run_to_completion, ApiResponse};
use crate::state::AppState;
use crate::WebResult;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use studio_booking_core::audit::CLASS_CREATED;
use studio_booking_core::{ClassDefinition, RegisterClassRequest};

/// Register a class.
///
/// # Endpoint
///
/// ```text
/// POST /classes
/// ```
///
/// # Request
///
/// ```json
/// {"name": "Pilates", "startDate": "01-12-2024", "endDate": "20-12-2024", "capacity": 10}
/// ```
///
/// `className` is accepted in place of `name`.
///
/// # Errors
///
/// 400 for an unreadable body or any validation failure, 500 when the
/// catalog snapshot could not be written.
pub async fn register_class(
    State(state): State<AppState>,
    payload: Result<Json<RegisterClassRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<ApiResponse<ClassDefinition>>)> {
    let Json(request) = payload?;
    let class =
        run_to_completion(async move { state.admission.register_class(request).await }).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CLASS_CREATED, class)),
    ))
}
