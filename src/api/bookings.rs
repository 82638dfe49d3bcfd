//! Booking workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, CreateBooking},
};

use super::SharerId;

/// Approval decision query parameter
#[derive(Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// List bookings made by the caller
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "Caller's bookings", body = Vec<BookingDetails>),
        (status = 404, description = "Caller not found")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.get_user_bookings(user_id).await?;
    Ok(Json(bookings))
}

/// List bookings on items the caller owns
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<BookingDetails>),
        (status = 404, description = "Caller not found")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.get_owner_bookings(user_id).await?;
    Ok(Json(bookings))
}

/// Get a booking; visible to the booker and the item's owner only
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 403, description = "Caller is neither booker nor owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_booking(id, user_id).await?;
    Ok(Json(booking))
}

/// Book an item for a time range
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING status", body = BookingDetails),
        (status = 400, description = "Invalid time window"),
        (status = 404, description = "Caller or item not found"),
        (status = 409, description = "Item unavailable or period already booked")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create_booking(request, user_id).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking; owner only
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("approved" = bool, Query, description = "true to approve, false to reject")
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 403, description = "Caller does not own the item"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already decided or period taken")
    )
)]
pub async fn decide_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
    Query(query): Query<ApprovalQuery>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .decide_booking(id, query.approved, user_id)
        .await?;
    Ok(Json(booking))
}

/// Cancel a booking; booker only
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 403, description = "Caller is not the booker"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete_booking(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
