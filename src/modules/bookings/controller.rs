use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use staybook_core::{AppError, ErrorResponse};
use staybook_models::{Booking, BookingId, BookingWithRoom};

use super::payload::CreateBookingPayload;
use super::service::BookingService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::NormalizedJson;

/// Result of a status change.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingActionResponse {
    pub message: String,
    pub booking: Booking,
}

/// Create a booking
///
/// Accepts guest details either as flat fields or in a nested `guest_data`
/// object. `guest_email` defaults to the account e-mail.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Booking created, awaiting payment", body = Booking),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Room already booked for these dates", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    NormalizedJson(dto): NormalizedJson<CreateBookingPayload>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let caller = auth_user.caller()?;
    let booking = BookingService::create(&state.db, &caller, dto).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Bookings ordered by check-in date, latest first", body = Vec<BookingWithRoom>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn list_my_bookings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<BookingWithRoom>>, AppError> {
    let caller = auth_user.caller()?;
    let bookings = BookingService::list_mine(&state.db, &caller).await?;
    Ok(Json(bookings))
}

/// Get one of the caller's bookings
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = BookingId, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with its room", body = BookingWithRoom),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Booking belongs to another user", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingWithRoom>, AppError> {
    let caller = auth_user.caller()?;
    let booking = BookingService::get(&state.db, &caller, id).await?;
    Ok(Json(booking))
}

/// Pay for a booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/pay",
    params(("id" = BookingId, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking paid", body = BookingActionResponse),
        (status = 400, description = "Booking is not awaiting payment", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Booking belongs to another user", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn pay_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingActionResponse>, AppError> {
    let caller = auth_user.caller()?;
    let booking = BookingService::pay(&state.db, &caller, id).await?;
    Ok(Json(BookingActionResponse {
        message: "Booking paid successfully".to_string(),
        booking,
    }))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    params(("id" = BookingId, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingActionResponse),
        (status = 400, description = "Booking is already cancelled", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Booking belongs to another user", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingActionResponse>, AppError> {
    let caller = auth_user.caller()?;
    let booking = BookingService::cancel(&state.db, &caller, id).await?;
    Ok(Json(BookingActionResponse {
        message: "Booking cancelled successfully".to_string(),
        booking,
    }))
}
