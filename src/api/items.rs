//! Item catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, Item, ItemDetails, UpdateItem},
    },
};

use super::{validate_payload, SharerId};

/// Search query parameters
#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

/// List the caller's items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "Caller's items", body = Vec<Item>),
        (status = 400, description = "Missing caller header")
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.items.get_user_items(user_id).await?;
    Ok(Json(items))
}

/// Get item details with comments; owners also see booking dates
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_item(id, user_id).await?;
    Ok(Json(item))
}

/// Search available items by text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(
        ("text" = String, Query, description = "Search text")
    ),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.items.search_items(&query.text).await?;
    Ok(Json(items))
}

/// List a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner or answered request not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    validate_payload(&request)?;
    let item = state.services.items.create_item(request, user_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an item; only its owner may do so
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found for this owner")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
    Json(request): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    validate_payload(&request)?;
    let item = state.services.items.update_item(id, request, user_id).await?;
    Ok(Json(item))
}

/// Comment on an item after renting it
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment added", body = CommentDetails),
        (status = 404, description = "Item, author or booking not found"),
        (status = 409, description = "Rental period has not ended")
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i32>,
    Json(request): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<CommentDetails>)> {
    validate_payload(&request)?;
    let comment = state.services.comments.add_comment(id, user_id, request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
