//! Request board endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
};

use super::{validate_payload, SharerId};

/// List the caller's own requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    responses(
        (status = 200, description = "Caller's requests, newest first", body = Vec<ItemRequest>),
        (status = 404, description = "Caller not found")
    )
)]
pub async fn list_own_requests(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemRequest>>> {
    let requests = state.services.requests.get_own_requests(user_id).await?;
    Ok(Json(requests))
}

/// List every other user's requests
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    responses(
        (status = 200, description = "Other users' requests, newest first", body = Vec<ItemRequest>),
        (status = 404, description = "Caller not found")
    )
)]
pub async fn list_other_requests(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemRequest>>> {
    let requests = state.services.requests.get_other_requests(user_id).await?;
    Ok(Json(requests))
}

/// Get a request with the items answering it
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "Request or caller not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(id, user_id).await?;
    Ok(Json(request))
}

/// Post a new borrow request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Caller not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemRequest>)> {
    validate_payload(&request)?;
    let created = state.services.requests.create_request(request, user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
