//! Booking endpoint.

use super::{run_to_completion, ApiResponse};
use crate::state::AppState;
use crate::WebResult;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use studio_booking_core::audit::BOOKING_CREATED;
use studio_booking_core::{BookingAdmission, CreateBookingRequest};

/// Book a member into a class on one day.
///
/// # Endpoint
///
/// ```text
/// POST /bookings
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Booking successful",
///   "data": {
///     "booking": {"id": 1, "memberName": "Rahul R P", "date": "16-12-2024", "className": "Pilates"},
///     "availableSlots": 9
///   }
/// }
/// ```
///
/// # Errors
///
/// 400 for an unreadable body, a validation failure, an unknown or inactive
/// class, or a full class. 500 when the ledger snapshot could not be written.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<ApiResponse<BookingAdmission>>)> {
    let Json(request) = payload?;
    let admission =
        run_to_completion(async move { state.admission.create_booking(request).await }).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(BOOKING_CREATED, admission)),
    ))
}
