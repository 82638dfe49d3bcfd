//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "1.0.0",
        description = "Peer-to-peer item sharing REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Items
        items::list_items,
        items::get_item,
        items::search_items,
        items::create_item,
        items::update_item,
        items::create_comment,
        items::delete_item,
        // Bookings
        bookings::list_bookings,
        bookings::list_owner_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::decide_booking,
        bookings::delete_booking,
        // Requests
        requests::list_own_requests,
        requests::list_other_requests,
        requests::get_request,
        requests::create_request,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::item::Item,
            crate::models::item::ItemShort,
            crate::models::item::ItemDetails,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::comment::CommentDetails,
            crate::models::comment::CreateComment,
            crate::models::request::ItemRequest,
            crate::models::request::ItemRequestDetails,
            crate::models::request::CreateItemRequest,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "users", description = "User registry"),
        (name = "items", description = "Item catalog and comments"),
        (name = "bookings", description = "Booking workflow"),
        (name = "requests", description = "Request board")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
