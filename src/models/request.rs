//! Item request (borrow wish) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::item::ItemShort;

/// Item request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItemRequest {
    pub id: i32,
    pub description: String,
    pub requester_id: i32,
    pub created: DateTime<Utc>,
}

/// Item request with the items offered to fulfill it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i32,
    pub description: String,
    pub requester_id: i32,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemShort>,
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 500, message = "description must be 1-500 characters"))]
    pub description: String,
}
