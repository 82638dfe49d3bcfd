//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use validator::Validate;

use crate::{error::AppError, AppState};

/// Header carrying the caller's user id on every identified operation
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extractor for the caller identity from the `X-Sharer-User-Id` header
pub struct SharerId(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for SharerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SHARER_USER_ID)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Validation(format!("Missing {} header", SHARER_USER_ID))
            })?;

        let user_id: i32 = header
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid {} header", SHARER_USER_ID)))?;

        if user_id <= 0 {
            return Err(AppError::Validation(format!(
                "{} must be a positive id",
                SHARER_USER_ID
            )));
        }

        Ok(SharerId(user_id))
    }
}

/// Run declarative validation on an incoming payload
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;

    #[test]
    fn test_validate_payload() {
        let ok = CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(validate_payload(&ok).is_ok());

        let bad = CreateUser {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(matches!(validate_payload(&bad), Err(AppError::Validation(_))));
    }
}
